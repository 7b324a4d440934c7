//! The check battery: probe contract, registry, and orchestration.
//!
//! Every check is a self-contained async probe that receives a shared
//! [`CheckContext`] and returns exactly one [`CheckResult`]. Checks never
//! propagate errors; network failures, parse failures, and missing data
//! are absorbed into an error-status result so one broken probe cannot
//! sink the rest of the battery. Each check measures its own wall-clock
//! duration and bounds its requests with the context timeout.
//!
//! [`registry()`] lists the battery in execution order; the response
//! envelope mirrors that order. [`run_checks`] fans the battery out
//! concurrently and collects the results.

mod accessibility;
mod context;
mod dns_records;
mod dns_security;
mod headers;
mod https;
mod ip_hosting;
mod links;
mod metadata;
mod performance;
mod redirects;
mod report;
mod robots;
mod runner;
mod security_txt;
mod server_headers;
mod sitemap;
mod social;
mod stack;
mod uptime;
mod waf;

pub use context::CheckContext;
pub use report::{
    CategoryScore, CheckCategory, CheckResult, CheckStatus, ChecksResponse, GlobalScore, Grade,
    Recommendation, ReferenceLink, Severity,
};
pub use runner::run_checks;

use futures::future::BoxFuture;

/// A check wired into the battery.
pub struct RegisteredCheck {
    /// Stable identifier, unique within the registry.
    pub id: &'static str,
    /// Human-readable name.
    pub label: &'static str,
    /// Category the check scores under.
    pub category: CheckCategory,
    pub(crate) entry: fn(CheckContext) -> BoxFuture<'static, CheckResult>,
}

static REGISTRY: [RegisteredCheck; 18] = [
    RegisteredCheck {
        id: headers::ID,
        label: headers::LABEL,
        category: headers::CATEGORY,
        entry: |ctx| Box::pin(headers::run(ctx)),
    },
    RegisteredCheck {
        id: https::ID,
        label: https::LABEL,
        category: https::CATEGORY,
        entry: |ctx| Box::pin(https::run(ctx)),
    },
    RegisteredCheck {
        id: security_txt::ID,
        label: security_txt::LABEL,
        category: security_txt::CATEGORY,
        entry: |ctx| Box::pin(security_txt::run(ctx)),
    },
    RegisteredCheck {
        id: redirects::ID,
        label: redirects::LABEL,
        category: redirects::CATEGORY,
        entry: |ctx| Box::pin(redirects::run(ctx)),
    },
    RegisteredCheck {
        id: dns_records::ID,
        label: dns_records::LABEL,
        category: dns_records::CATEGORY,
        entry: |ctx| Box::pin(dns_records::run(ctx)),
    },
    RegisteredCheck {
        id: dns_security::ID,
        label: dns_security::LABEL,
        category: dns_security::CATEGORY,
        entry: |ctx| Box::pin(dns_security::run(ctx)),
    },
    RegisteredCheck {
        id: ip_hosting::ID,
        label: ip_hosting::LABEL,
        category: ip_hosting::CATEGORY,
        entry: |ctx| Box::pin(ip_hosting::run(ctx)),
    },
    RegisteredCheck {
        id: robots::ID,
        label: robots::LABEL,
        category: robots::CATEGORY,
        entry: |ctx| Box::pin(robots::run(ctx)),
    },
    RegisteredCheck {
        id: sitemap::ID,
        label: sitemap::LABEL,
        category: sitemap::CATEGORY,
        entry: |ctx| Box::pin(sitemap::run(ctx)),
    },
    RegisteredCheck {
        id: links::ID,
        label: links::LABEL,
        category: links::CATEGORY,
        entry: |ctx| Box::pin(links::run(ctx)),
    },
    RegisteredCheck {
        id: metadata::ID,
        label: metadata::LABEL,
        category: metadata::CATEGORY,
        entry: |ctx| Box::pin(metadata::run(ctx)),
    },
    RegisteredCheck {
        id: accessibility::ID,
        label: accessibility::LABEL,
        category: accessibility::CATEGORY,
        entry: |ctx| Box::pin(accessibility::run(ctx)),
    },
    RegisteredCheck {
        id: performance::ID,
        label: performance::LABEL,
        category: performance::CATEGORY,
        entry: |ctx| Box::pin(performance::run(ctx)),
    },
    RegisteredCheck {
        id: server_headers::ID,
        label: server_headers::LABEL,
        category: server_headers::CATEGORY,
        entry: |ctx| Box::pin(server_headers::run(ctx)),
    },
    RegisteredCheck {
        id: social::ID,
        label: social::LABEL,
        category: social::CATEGORY,
        entry: |ctx| Box::pin(social::run(ctx)),
    },
    RegisteredCheck {
        id: stack::ID,
        label: stack::LABEL,
        category: stack::CATEGORY,
        entry: |ctx| Box::pin(stack::run(ctx)),
    },
    RegisteredCheck {
        id: waf::ID,
        label: waf::LABEL,
        category: waf::CATEGORY,
        entry: |ctx| Box::pin(waf::run(ctx)),
    },
    RegisteredCheck {
        id: uptime::ID,
        label: uptime::LABEL,
        category: uptime::CATEGORY,
        entry: |ctx| Box::pin(uptime::run(ctx)),
    },
];

/// Returns the check battery in execution order.
pub fn registry() -> &'static [RegisteredCheck] {
    &REGISTRY
}

/// Maps a fetch error to a one-line summary, distinguishing timeouts
/// from every other failure mode.
pub(crate) fn failure_summary(error: &reqwest::Error, fallback: &str) -> String {
    if error.is_timeout() {
        "Request timed out.".to_string()
    } else {
        fallback.to_string()
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::time::Duration;
    use strum::IntoEnumIterator;
    use wiremock::matchers::any;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn registry_lists_the_battery_in_contract_order() {
        let ids: Vec<&str> = registry().iter().map(|c| c.id).collect();
        assert_eq!(
            ids,
            vec![
                "headers",
                "https",
                "security-txt",
                "redirects",
                "dns-records",
                "dns-security",
                "ip-hosting",
                "robots",
                "sitemap",
                "links",
                "metadata",
                "accessibility",
                "performance",
                "server-headers",
                "social",
                "stack",
                "waf",
                "uptime",
            ]
        );
    }

    #[test]
    fn registry_ids_are_unique_and_labels_non_empty() {
        let mut seen = HashSet::new();
        for check in registry() {
            assert!(seen.insert(check.id), "duplicate check id {}", check.id);
            assert!(!check.label.is_empty(), "check {} has no label", check.id);
        }
    }

    #[test]
    fn every_category_has_at_least_one_check() {
        for category in CheckCategory::iter() {
            assert!(
                registry().iter().any(|c| c.category == category),
                "category {category} has no checks"
            );
        }
    }

    #[tokio::test]
    async fn failure_summary_distinguishes_timeouts() {
        let server = MockServer::start().await;
        Mock::given(any())
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(400)))
            .mount(&server)
            .await;

        let client = reqwest::Client::new();
        let error = client
            .get(server.uri())
            .timeout(Duration::from_millis(50))
            .send()
            .await
            .unwrap_err();
        assert!(error.is_timeout());
        assert_eq!(failure_summary(&error, "Unable to fetch."), "Request timed out.");
    }

    #[tokio::test]
    async fn failure_summary_falls_back_for_other_errors() {
        let client = reqwest::Client::new();
        let error = client
            .get("http://127.0.0.1:1")
            .send()
            .await
            .unwrap_err();
        assert_eq!(failure_summary(&error, "Unable to fetch."), "Unable to fetch.");
    }
}
