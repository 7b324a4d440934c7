//! Remediation advice builders attached to degraded check results.

mod performance;
mod security;

pub(crate) use performance::{compression_recommendation, slow_response_recommendation};
pub(crate) use security::{
    dns_security_recommendation, excessive_redirects_recommendation, hsts_recommendation,
    https_recommendation, redirect_loop_recommendation, security_headers_recommendation,
};
