//! Mail-security DNS posture (SPF, DMARC, DKIM).

use std::time::Instant;

use hickory_resolver::proto::rr::RecordType;
use serde_json::{Map, Value};

use crate::checks::{CheckCategory, CheckContext, CheckResult, CheckStatus};
use crate::config::DKIM_SELECTORS;
use crate::dns::{dkim_query_name, dmarc_query_name, extract_dmarc_record, extract_spf_record, is_dkim_record};
use crate::recommendations::dns_security_recommendation;
use crate::utils::elapsed_ms;

pub(crate) const ID: &str = "dns-security";
pub(crate) const LABEL: &str = "DNS Security";
pub(crate) const CATEGORY: CheckCategory = CheckCategory::NetworkDns;

/// Looks for the three mail-security records. SPF and DMARC live at fixed
/// names; DKIM keys hang off a selector, so a short list of common selectors
/// is probed and the first hit wins.
pub(crate) async fn run(ctx: CheckContext) -> CheckResult {
    let start = Instant::now();

    let dmarc_name = dmarc_query_name(&ctx.hostname);
    let (root_txt, dmarc_txt) = tokio::join!(
        ctx.dns.lookup(RecordType::TXT, &ctx.hostname),
        ctx.dns.lookup(RecordType::TXT, &dmarc_name),
    );
    let spf_record = extract_spf_record(&root_txt.records);
    let dmarc_record = extract_dmarc_record(&dmarc_txt.records);

    let mut dkim_record: Option<String> = None;
    for selector in DKIM_SELECTORS {
        let answer = ctx
            .dns
            .lookup(RecordType::TXT, &dkim_query_name(selector, &ctx.hostname))
            .await;
        if let Some(record) = answer.records.iter().find(|txt| is_dkim_record(txt)) {
            dkim_record = Some(record.clone());
            break;
        }
    }

    let (status, summary, missing) = classify(
        spf_record.is_some(),
        dmarc_record.is_some(),
        dkim_record.is_some(),
    );

    let mut data = Map::new();
    data.insert("spf".to_string(), Value::Bool(spf_record.is_some()));
    data.insert("dmarc".to_string(), Value::Bool(dmarc_record.is_some()));
    data.insert("dkim".to_string(), Value::Bool(dkim_record.is_some()));
    if let Some(spf) = spf_record {
        data.insert("spfRecord".to_string(), Value::String(spf));
    }
    if let Some(dmarc) = dmarc_record {
        data.insert("dmarcRecord".to_string(), Value::String(dmarc));
    }
    if let Some(dkim) = dkim_record {
        data.insert("dkimRecord".to_string(), Value::String(dkim));
    }

    let mut result = CheckResult::new(ID, LABEL, CATEGORY, status, elapsed_ms(start))
        .with_summary(summary)
        .with_data(Value::Object(data));
    if !missing.is_empty() {
        result.recommendation = Some(dns_security_recommendation(&missing));
    }
    result
}

fn classify(spf: bool, dmarc: bool, dkim: bool) -> (CheckStatus, String, Vec<&'static str>) {
    let mut missing: Vec<&'static str> = Vec::new();
    if !spf {
        missing.push("SPF");
    }
    if !dmarc {
        missing.push("DMARC");
    }
    if !dkim {
        missing.push("DKIM");
    }

    match missing.len() {
        0 => (
            CheckStatus::Ok,
            "All DNS security records are present (SPF, DMARC, DKIM).".to_string(),
            missing,
        ),
        1 => (
            CheckStatus::Warning,
            format!("Missing DNS security record: {}.", missing[0]),
            missing,
        ),
        _ => (
            CheckStatus::Warning,
            format!("Missing DNS security records: {}.", missing.join(", ")),
            missing,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::testing::context_for;
    use crate::checks::Severity;

    #[test]
    fn all_records_present_is_ok() {
        let (status, summary, missing) = classify(true, true, true);
        assert_eq!(status, CheckStatus::Ok);
        assert_eq!(
            summary,
            "All DNS security records are present (SPF, DMARC, DKIM)."
        );
        assert!(missing.is_empty());
    }

    #[test]
    fn single_missing_record_is_named() {
        let (status, summary, missing) = classify(true, false, true);
        assert_eq!(status, CheckStatus::Warning);
        assert_eq!(summary, "Missing DNS security record: DMARC.");
        assert_eq!(missing, vec!["DMARC"]);
    }

    #[test]
    fn multiple_missing_records_are_joined() {
        let (status, summary, missing) = classify(false, true, false);
        assert_eq!(status, CheckStatus::Warning);
        assert_eq!(summary, "Missing DNS security records: SPF, DKIM.");
        assert_eq!(missing, vec!["SPF", "DKIM"]);
    }

    #[tokio::test]
    async fn nonexistent_host_is_missing_everything() {
        let result = run(context_for("https://host.invalid")).await;
        assert_eq!(result.status, CheckStatus::Warning);
        assert_eq!(
            result.summary.as_deref(),
            Some("Missing DNS security records: SPF, DMARC, DKIM.")
        );
        // DMARC in the missing set escalates the recommendation.
        assert_eq!(result.recommendation.unwrap().severity, Severity::Critical);

        let data = result.data.unwrap();
        assert_eq!(data["spf"], false);
        assert_eq!(data["dmarc"], false);
        assert_eq!(data["dkim"], false);
        assert!(data.get("spfRecord").is_none());
    }
}
