//! Security-related recommendation builders.

use crate::checks::{Recommendation, ReferenceLink, Severity};
use crate::config::HEADER_CONTENT_SECURITY_POLICY;

/// Builds the advisory for missing security headers.
///
/// Escalates to critical when the Content-Security-Policy header is
/// among the missing ones.
pub(crate) fn security_headers_recommendation(missing: &[&str]) -> Recommendation {
    let severity = if missing.contains(&HEADER_CONTENT_SECURITY_POLICY) {
        Severity::Critical
    } else {
        Severity::Warning
    };

    Recommendation {
        id: "missing-security-headers".to_string(),
        title: "Missing security headers".to_string(),
        description: "Some important HTTP security headers are not present in the response."
            .to_string(),
        impact:
            "Missing headers may expose users to attacks like XSS, clickjacking, or data injection."
                .to_string(),
        how_to: missing
            .iter()
            .map(|header| {
                format!("Add the \"{header}\" header with an appropriate value on the server.")
            })
            .collect(),
        references: vec![ReferenceLink {
            label: "OWASP Secure Headers Project".to_string(),
            url: "https://owasp.org/www-project-secure-headers/".to_string(),
        }],
        severity,
    }
}

/// Builds the advisory for a site that does not enforce HTTPS.
pub(crate) fn https_recommendation() -> Recommendation {
    Recommendation {
        id: "https-not-enforced".to_string(),
        title: "HTTPS is not enforced".to_string(),
        description: "The website does not consistently redirect HTTP traffic to HTTPS."
            .to_string(),
        impact: "Unencrypted traffic can be intercepted or modified by attackers.".to_string(),
        how_to: vec![
            "Enable HTTPS on the server.".to_string(),
            "Redirect all HTTP requests to HTTPS.".to_string(),
            "Enable HSTS once HTTPS is stable.".to_string(),
        ],
        references: vec![ReferenceLink {
            label: "MDN – HTTPS".to_string(),
            url: "https://developer.mozilla.org/en-US/docs/Web/HTTP/Overview".to_string(),
        }],
        severity: Severity::Critical,
    }
}

/// Builds the advisory for a missing Strict-Transport-Security header.
pub(crate) fn hsts_recommendation() -> Recommendation {
    Recommendation {
        id: "missing-hsts".to_string(),
        title: "HSTS is not enabled".to_string(),
        description: "The Strict-Transport-Security header is not present.".to_string(),
        impact: "Users may be vulnerable to downgrade attacks or SSL stripping.".to_string(),
        how_to: vec![
            "Add the Strict-Transport-Security header.".to_string(),
            "Start with a low max-age value (e.g., 300 seconds).".to_string(),
            "Increase max-age once validated.".to_string(),
        ],
        references: vec![ReferenceLink {
            label: "MDN – Strict-Transport-Security".to_string(),
            url: "https://developer.mozilla.org/en-US/docs/Web/HTTP/Headers/Strict-Transport-Security"
                .to_string(),
        }],
        severity: Severity::Warning,
    }
}

/// Builds the advisory for a detected redirect loop.
pub(crate) fn redirect_loop_recommendation() -> Recommendation {
    Recommendation {
        id: "redirect-loop".to_string(),
        title: "Redirect loop detected".to_string(),
        description: "The website has a redirect loop that prevents access.".to_string(),
        impact: "Users cannot access the website, and search engines may de-index the site."
            .to_string(),
        how_to: vec![
            "Review the redirect chain configuration.".to_string(),
            "Remove circular redirects.".to_string(),
            "Ensure each redirect has a clear final destination.".to_string(),
        ],
        references: vec![],
        severity: Severity::Critical,
    }
}

/// Builds the advisory for an overly long redirect chain.
pub(crate) fn excessive_redirects_recommendation(count: usize) -> Recommendation {
    Recommendation {
        id: "excessive-redirects".to_string(),
        title: "Excessive redirects detected".to_string(),
        description: format!("The website has {count} redirects in the chain."),
        impact:
            "Multiple redirects slow down page load times and degrade user experience and SEO."
                .to_string(),
        how_to: vec![
            "Simplify the redirect chain.".to_string(),
            "Use direct redirects to the final destination.".to_string(),
            "Consider using a single redirect when possible.".to_string(),
        ],
        references: vec![],
        severity: Severity::Warning,
    }
}

/// Builds the advisory for missing SPF/DMARC/DKIM records.
///
/// `missing` holds the record names exactly as they should appear to the
/// user ("SPF", "DMARC", "DKIM"). Escalates to critical when DMARC is
/// missing.
pub(crate) fn dns_security_recommendation(missing: &[&str]) -> Recommendation {
    let mut how_to = Vec::new();
    if missing.contains(&"SPF") {
        how_to.push("Add an SPF record (TXT record starting with \"v=spf1\") to your DNS.".to_string());
    }
    if missing.contains(&"DMARC") {
        how_to.push(
            "Add a DMARC record (TXT record at \"_dmarc.yourdomain.com\" starting with \"v=DMARC1\")."
                .to_string(),
        );
    }
    if missing.contains(&"DKIM") {
        how_to.push(
            "Configure DKIM with your email provider and add the public key as a TXT record."
                .to_string(),
        );
    }

    Recommendation {
        id: "missing-dns-security".to_string(),
        title: "Missing DNS security records".to_string(),
        description: format!(
            "The following DNS security records are missing: {}.",
            missing.join(", ")
        ),
        impact:
            "Missing DNS security records may expose the domain to email spoofing and delivery issues."
                .to_string(),
        how_to,
        references: vec![ReferenceLink {
            label: "DMARC Guide".to_string(),
            url: "https://dmarc.org/wiki/FAQ".to_string(),
        }],
        severity: if missing.contains(&"DMARC") {
            Severity::Critical
        } else {
            Severity::Warning
        },
    }
}
