use std::net::{IpAddr, SocketAddr};

use tokio::net;

use crate::domain::errors::AppError;

/// Turns a user-supplied identifier into a canonical IP address string.
///
/// IP literals pass through unchanged. Anything else is treated as a URL or
/// bare hostname: the scheme, path and port are stripped and the host is
/// forward-resolved to an IPv4 address with a single best-effort DNS query.
pub async fn resolve(identifier: &str) -> Result<String, AppError> {
    if identifier.parse::<IpAddr>().is_ok() {
        return Ok(identifier.to_string());
    }

    let host = host_of(identifier);
    if host.is_empty() {
        return Err(AppError::InvalidIdentifier(format!(
            "Could not resolve URL or IP address '{}': empty host.",
            identifier
        )));
    }

    let addresses = net::lookup_host((host, 0)).await.map_err(|e| {
        AppError::InvalidIdentifier(format!(
            "Could not resolve URL or IP address '{}': {}.",
            identifier, e
        ))
    })?;

    addresses
        .filter_map(|address| match address {
            SocketAddr::V4(v4) => Some(v4.ip().to_string()),
            SocketAddr::V6(_) => None,
        })
        .next()
        .ok_or_else(|| {
            AppError::InvalidIdentifier(format!(
                "Could not resolve URL or IP address '{}' to an IPv4 address.",
                identifier
            ))
        })
}

/// Extracts the host component: drops a leading scheme, then everything from
/// the first path/query/fragment separator, then a trailing port.
fn host_of(identifier: &str) -> &str {
    let without_scheme = identifier
        .split_once("://")
        .map(|(_, rest)| rest)
        .unwrap_or(identifier);
    let host_port = without_scheme
        .split(['/', '?', '#'])
        .next()
        .unwrap_or_default();
    host_port.split(':').next().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::net::Ipv4Addr;

    #[tokio::test]
    async fn ipv4_literal_passes_through_unchanged() {
        assert_eq!(resolve("192.168.1.1").await.unwrap(), "192.168.1.1");
    }

    #[tokio::test]
    async fn ipv6_literal_passes_through_unchanged() {
        assert_eq!(
            resolve("2606:4700:4700::1111").await.unwrap(),
            "2606:4700:4700::1111"
        );
    }

    #[tokio::test]
    async fn hostname_resolves_to_an_ipv4_address() {
        let ip = resolve("localhost").await.unwrap();
        let parsed: Ipv4Addr = ip.parse().unwrap();
        assert!(parsed.is_loopback());
    }

    #[tokio::test]
    async fn url_scheme_path_and_port_are_stripped() {
        let ip = resolve("http://localhost:8080/some/path?q=1").await.unwrap();
        let parsed: Ipv4Addr = ip.parse().unwrap();
        assert!(parsed.is_loopback());
    }

    #[tokio::test]
    async fn unresolvable_hostname_is_rejected() {
        let error = resolve("this-host-does-not-exist.invalid")
            .await
            .unwrap_err();
        assert!(matches!(error, AppError::InvalidIdentifier(_)));
        assert!(error.to_string().contains("Could not resolve"));
    }

    #[tokio::test]
    async fn empty_identifier_is_rejected() {
        let error = resolve("").await.unwrap_err();
        assert!(matches!(error, AppError::InvalidIdentifier(_)));
    }

    #[test]
    fn host_extraction_handles_bare_and_full_forms() {
        assert_eq!(host_of("example.com"), "example.com");
        assert_eq!(host_of("https://example.com/path"), "example.com");
        assert_eq!(host_of("example.com:443"), "example.com");
        assert_eq!(host_of("https://example.com:443/a?b=c#d"), "example.com");
    }
}
