//! Resolved IP address and hosting provider details.

use std::time::Instant;

use serde_json::{Map, Value};

use crate::checks::{CheckCategory, CheckContext, CheckResult, CheckStatus};
use crate::ip_intel::{lookup_ip_intelligence, IpIntelligence};
use crate::utils::elapsed_ms;

pub(crate) const ID: &str = "ip-hosting";
pub(crate) const LABEL: &str = "IP & Hosting Information";
pub(crate) const CATEGORY: CheckCategory = CheckCategory::NetworkDns;

/// Resolves the host to an IP and enriches it with ASN and provider data
/// from the intelligence API. The IP alone is still worth reporting when
/// the enrichment is unavailable.
pub(crate) async fn run(ctx: CheckContext) -> CheckResult {
    let start = Instant::now();

    let ip = match ctx.dns.resolve_ip(&ctx.hostname).await {
        Some(ip) => ip,
        None => {
            return CheckResult::new(ID, LABEL, CATEGORY, CheckStatus::Error, elapsed_ms(start))
                .with_summary("Unable to resolve IP address.");
        }
    };

    let Some(intelligence) = lookup_ip_intelligence(&ip, &ctx.client, ctx.timeout).await else {
        return CheckResult::new(ID, LABEL, CATEGORY, CheckStatus::Warning, elapsed_ms(start))
            .with_summary(format!("IP: {ip} (hosting details unavailable)"))
            .with_data(serde_json::json!({ "ip": ip }));
    };

    let (status, summary) = describe(&ip, &intelligence);

    let mut data = Map::new();
    data.insert("ip".to_string(), Value::String(ip));
    if let Some(asn) = intelligence.asn {
        data.insert("asn".to_string(), Value::String(asn));
    }
    if let Some(isp) = intelligence.isp {
        data.insert("isp".to_string(), Value::String(isp));
    }
    if let Some(country) = intelligence.country {
        data.insert("country".to_string(), Value::String(country));
    }
    if let Some(city) = intelligence.city {
        data.insert("city".to_string(), Value::String(city));
    }

    CheckResult::new(ID, LABEL, CATEGORY, status, elapsed_ms(start))
        .with_summary(summary)
        .with_data(Value::Object(data))
}

/// An answer with an ASN counts as complete; anything less degrades to a
/// warning but still reports whatever fields came back.
fn describe(ip: &str, intelligence: &IpIntelligence) -> (CheckStatus, String) {
    let mut parts = vec![format!("IP: {ip}")];
    if let Some(asn) = &intelligence.asn {
        parts.push(format!("ASN: {asn}"));
    }
    if let Some(isp) = &intelligence.isp {
        parts.push(format!("ISP: {isp}"));
    }
    if let Some(country) = &intelligence.country {
        parts.push(format!("Location: {country}"));
    }

    let status = if intelligence.asn.is_some() {
        CheckStatus::Ok
    } else {
        CheckStatus::Warning
    };
    (status, parts.join(", "))
}
