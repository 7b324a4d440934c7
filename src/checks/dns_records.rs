//! DNS record inventory.

use std::time::Instant;

use hickory_resolver::proto::rr::RecordType;
use serde_json::{json, Value};

use crate::checks::{CheckCategory, CheckContext, CheckResult, CheckStatus};
use crate::utils::elapsed_ms;

pub(crate) const ID: &str = "dns-records";
pub(crate) const LABEL: &str = "DNS Records";
pub(crate) const CATEGORY: CheckCategory = CheckCategory::NetworkDns;

/// Queries the six common record types concurrently and inventories what the
/// zone serves. A host with no A, AAAA, MX, or NS records is unreachable by
/// name, so that combination is an error; TXT and CNAME alone do not count.
pub(crate) async fn run(ctx: CheckContext) -> CheckResult {
    let start = Instant::now();

    let (a, aaaa, mx, ns, txt, cname) = tokio::join!(
        ctx.dns.lookup(RecordType::A, &ctx.hostname),
        ctx.dns.lookup(RecordType::AAAA, &ctx.hostname),
        ctx.dns.lookup(RecordType::MX, &ctx.hostname),
        ctx.dns.lookup(RecordType::NS, &ctx.hostname),
        ctx.dns.lookup(RecordType::TXT, &ctx.hostname),
        ctx.dns.lookup(RecordType::CNAME, &ctx.hostname),
    );

    let (status, summary) = classify(
        a.records.len(),
        aaaa.records.len(),
        mx.records.len(),
        ns.records.len(),
        txt.records.len(),
        cname.records.len(),
    );

    CheckResult::new(ID, LABEL, CATEGORY, status, elapsed_ms(start))
        .with_summary(summary)
        .with_data(json!({
            "a": a.records,
            "aaaa": aaaa.records,
            "mx": mx_payload(&mx.records),
            "ns": ns.records,
            "txt": txt.records,
            "cname": cname.records,
        }))
}

fn classify(
    a: usize,
    aaaa: usize,
    mx: usize,
    ns: usize,
    txt: usize,
    cname: usize,
) -> (CheckStatus, String) {
    if a == 0 && aaaa == 0 && mx == 0 && ns == 0 {
        return (CheckStatus::Error, "No DNS records found.".to_string());
    }

    let mut parts: Vec<String> = Vec::new();
    for (label, count) in [
        ("A", a),
        ("AAAA", aaaa),
        ("MX", mx),
        ("NS", ns),
        ("TXT", txt),
        ("CNAME", cname),
    ] {
        if count > 0 {
            parts.push(format!("{count} {label}"));
        }
    }
    (CheckStatus::Ok, format!("Found: {}.", parts.join(", ")))
}

/// Splits "priority exchange" display strings into structured MX entries.
fn mx_payload(records: &[String]) -> Vec<Value> {
    records
        .iter()
        .map(|record| {
            let (priority, exchange) = match record.split_once(' ') {
                Some((priority, exchange)) => (priority.parse::<u16>().unwrap_or(0), exchange),
                None => (0, record.as_str()),
            };
            json!({ "exchange": exchange, "priority": priority })
        })
        .collect()
}
