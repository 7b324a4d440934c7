//! Raw DNS record queries.
//!
//! One lookup function covers the six record types the checks care about
//! (A, AAAA, MX, NS, TXT, CNAME), normalizing every answer into display
//! strings. "No records found" is an empty success, not an error.

use anyhow::{Error, Result};
use hickory_resolver::proto::rr::{RData, RecordType};
use hickory_resolver::TokioAsyncResolver;

/// Queries `record_type` for a host and renders each answer as a string.
///
/// MX records render as "priority exchange" pairs sorted by priority; TXT
/// records join their character strings; name-typed records render as their
/// UTF-8 form without the trailing root dot.
///
/// # Arguments
///
/// * `resolver` - The DNS resolver instance
/// * `host` - The hostname to query
/// * `record_type` - The record type to query
///
/// # Returns
///
/// A vector of record strings; empty when the name exists but carries no
/// records of this type, or when the name does not exist at all.
///
/// # Errors
///
/// Returns an error for real failures (timeouts, network errors) so callers
/// can distinguish "nothing there" from "could not ask".
pub async fn lookup_records(
    resolver: &TokioAsyncResolver,
    host: &str,
    record_type: RecordType,
) -> Result<Vec<String>, Error> {
    match resolver.lookup(host, record_type).await {
        Ok(lookup) => {
            let mut records: Vec<String> = lookup
                .iter()
                .filter_map(|rdata| render_rdata(rdata, record_type))
                .collect();
            if record_type == RecordType::MX {
                // "10 mail.example.com." sorts numerically enough for display
                records.sort();
            }
            Ok(records)
        }
        Err(e) => {
            let error_msg = e.to_string();
            // "no records found" and NXDomain are expected for many hosts
            if error_msg.contains("no records found") || error_msg.contains("NXDomain") {
                Ok(Vec::new())
            } else {
                if error_msg.contains("timeout") || error_msg.contains("timed out") {
                    log::warn!("{record_type} record lookup timed out for {host}: {e}");
                } else {
                    log::warn!("Failed to lookup {record_type} records for {host}: {e}");
                }
                Err(e.into())
            }
        }
    }
}

fn render_rdata(rdata: &RData, record_type: RecordType) -> Option<String> {
    match (record_type, rdata) {
        (RecordType::A, RData::A(a)) => Some(a.to_string()),
        (RecordType::AAAA, RData::AAAA(aaaa)) => Some(aaaa.to_string()),
        (RecordType::MX, RData::MX(mx)) => Some(format!(
            "{} {}",
            mx.preference(),
            trim_root_dot(&mx.exchange().to_utf8())
        )),
        (RecordType::NS, RData::NS(ns)) => Some(trim_root_dot(&ns.to_utf8())),
        (RecordType::TXT, RData::TXT(txt)) => Some(
            txt.iter()
                .map(|bytes| String::from_utf8_lossy(bytes).to_string())
                .collect::<Vec<String>>()
                .join(""),
        ),
        (RecordType::CNAME, RData::CNAME(cname)) => Some(trim_root_dot(&cname.to_utf8())),
        _ => None,
    }
}

fn trim_root_dot(name: &str) -> String {
    name.strip_suffix('.').unwrap_or(name).to_string()
}
