//! DNS record extraction utilities.
//!
//! Predicates and query-name builders for the mail-security records (SPF,
//! DMARC, DKIM) the DNS security check looks for. Version tags are matched
//! case-insensitively; resolvers and registrars disagree on casing.

/// Extracts the SPF record from a set of root TXT records.
///
/// SPF records start with "v=spf1".
///
/// # Arguments
///
/// * `txt_records` - TXT record strings from the zone apex
///
/// # Returns
///
/// The first SPF record found, or `None` if no SPF record exists.
pub fn extract_spf_record(txt_records: &[String]) -> Option<String> {
    txt_records
        .iter()
        .find(|txt| txt.trim().to_lowercase().starts_with("v=spf1"))
        .map(|s| s.trim().to_string())
}

/// Extracts the DMARC record from TXT records of the `_dmarc.` subdomain.
///
/// DMARC records start with "v=DMARC1".
///
/// # Arguments
///
/// * `txt_records` - TXT record strings from `_dmarc.<domain>`
///
/// # Returns
///
/// The first DMARC record found, or `None` if no DMARC record exists.
pub fn extract_dmarc_record(txt_records: &[String]) -> Option<String> {
    txt_records
        .iter()
        .find(|txt| txt.trim().to_lowercase().starts_with("v=dmarc1"))
        .map(|s| s.trim().to_string())
}

/// Returns true if a TXT record is a DKIM key record ("v=DKIM1" anywhere).
pub fn is_dkim_record(txt: &str) -> bool {
    txt.to_lowercase().contains("v=dkim1")
}

/// Builds the DMARC policy query name for a domain.
pub fn dmarc_query_name(domain: &str) -> String {
    format!("_dmarc.{domain}")
}

/// Builds the DKIM key query name for a selector and domain.
pub fn dkim_query_name(selector: &str, domain: &str) -> String {
    format!("{selector}._domainkey.{domain}")
}
