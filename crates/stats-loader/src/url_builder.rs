//! Chunk URL construction.

use std::path::PathBuf;
use std::sync::Arc;

use path_clean::PathClean;
use percent_encoding::percent_decode_str;

use crate::manifest::AssetDescriptor;
use crate::storage::StaticStorage;

/// Query parameters of AWS v2/v4 signatures, lowercased.
const SIGNATURE_PARAMS: &[&str] = &[
    "x-amz-algorithm",
    "x-amz-credential",
    "x-amz-date",
    "x-amz-expires",
    "x-amz-signedheaders",
    "x-amz-signature",
    "x-amz-security-token",
    "awsaccesskeyid",
    "expires",
    "signature",
];

/// Turns chunk descriptors into final URLs.
#[derive(Clone)]
pub struct UrlBuilder {
    bundle_dir_name: String,
    storage: Arc<dyn StaticStorage>,
}

impl UrlBuilder {
    pub fn new(bundle_dir_name: impl Into<String>, storage: Arc<dyn StaticStorage>) -> Self {
        Self {
            bundle_dir_name: bundle_dir_name.into(),
            storage,
        }
    }

    /// An explicit `publicPath` wins verbatim; otherwise the storage URL of
    /// `bundle_dir_name + name`.
    pub fn url_for(&self, asset: &AssetDescriptor) -> String {
        if let Some(public_path) = asset.explicit_public_path() {
            return public_path.to_string();
        }
        self.storage_url(&self.relative_path(&asset.name))
    }

    /// `bundle_dir_name` joined with `name`, with `/` separators and `.`/`..`
    /// segments resolved.
    pub fn relative_path(&self, name: &str) -> String {
        let dir = self.bundle_dir_name.replace('\\', "/");
        let name = name.replace('\\', "/");
        let joined = if dir.is_empty() || dir.ends_with('/') {
            format!("{dir}{name}")
        } else {
            format!("{dir}/{name}")
        };

        PathBuf::from(joined)
            .clean()
            .to_string_lossy()
            .replace('\\', "/")
    }

    /// Storage URL of a path, unsigned if the storage signs.
    pub fn storage_url(&self, path: &str) -> String {
        let url = self.storage.url(path);
        if self.storage.signs_urls() {
            strip_signed_params(&url)
        } else {
            url
        }
    }
}

impl std::fmt::Debug for UrlBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UrlBuilder")
            .field("bundle_dir_name", &self.bundle_dir_name)
            .finish_non_exhaustive()
    }
}

/// Remove signature parameters from a pre-signed URL.
///
/// Other parameters keep their raw text and order; one without a value is
/// written back as `key=`. Applying this twice gives the same result.
pub fn strip_signed_params(url: &str) -> String {
    let Some((base, rest)) = url.split_once('?') else {
        return url.to_string();
    };
    let (query, fragment) = match rest.split_once('#') {
        Some((query, fragment)) => (query, Some(fragment)),
        None => (rest, None),
    };

    let kept: Vec<String> = query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .filter(|pair| !is_signature_param(pair))
        .map(|pair| {
            if pair.contains('=') {
                pair.to_string()
            } else {
                format!("{pair}=")
            }
        })
        .collect();

    let mut out = base.to_string();
    if !kept.is_empty() {
        out.push('?');
        out.push_str(&kept.join("&"));
    }
    if let Some(fragment) = fragment {
        out.push('#');
        out.push_str(fragment);
    }
    out
}

fn is_signature_param(pair: &str) -> bool {
    let raw_key = pair.split_once('=').map_or(pair, |(key, _)| key);
    let key = percent_decode_str(&raw_key.replace('+', " "))
        .decode_utf8_lossy()
        .to_ascii_lowercase();
    SIGNATURE_PARAMS.contains(&key.as_str())
}

/// `host[:port]` of a URL as written, empty for relative URLs.
///
/// The authority is sliced out of the raw text rather than parsed, so an
/// explicit default port (`https://example.com:443/`) is kept.
pub fn netloc(url: &str) -> String {
    let rest = match url.split_once(':') {
        Some((scheme, rest)) if is_scheme(scheme) => rest,
        _ => url,
    };
    let Some(authority) = rest.strip_prefix("//") else {
        return String::new();
    };

    let end = authority.find(['/', '?', '#']).unwrap_or(authority.len());
    let authority = &authority[..end];
    authority
        .rsplit_once('@')
        .map_or(authority, |(_, host)| host)
        .to_string()
}

fn is_scheme(candidate: &str) -> bool {
    let mut chars = candidate.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{FileSystemStorage, ObjectStoreStorage};

    fn builder(dir: &str) -> UrlBuilder {
        UrlBuilder::new(dir, Arc::new(FileSystemStorage::default()))
    }

    #[test]
    fn joins_bundle_dir_and_name() {
        let b = builder("webpack_bundles/");
        assert_eq!(
            b.url_for(&AssetDescriptor::new("main.js")),
            "/static/webpack_bundles/main.js"
        );
        assert_eq!(builder("bundles").relative_path("main.js"), "bundles/main.js");
        assert_eq!(
            builder("bundles\\nested\\").relative_path("..\\main.js"),
            "bundles/main.js"
        );
    }

    #[test]
    fn explicit_public_path_wins() {
        let mut asset = AssetDescriptor::new("main.js");
        asset.public_path = Some("http://localhost:3000/main.js".to_string());
        assert_eq!(
            builder("webpack_bundles/").url_for(&asset),
            "http://localhost:3000/main.js"
        );

        asset.public_path = Some("auto".to_string());
        assert_eq!(
            builder("webpack_bundles/").url_for(&asset),
            "/static/webpack_bundles/main.js"
        );
    }

    #[test]
    fn strips_signature_params_and_keeps_the_rest() {
        let signed = "https://bucket.s3.amazonaws.com/main.js?v=3&X-Amz-Algorithm=AWS4-HMAC-SHA256\
                      &X-Amz-Credential=abc%2F20240101&flag&X-Amz-Signature=deadbeef&Expires=1";
        let stripped = strip_signed_params(signed);

        assert_eq!(stripped, "https://bucket.s3.amazonaws.com/main.js?v=3&flag=");
        assert_eq!(strip_signed_params(&stripped), stripped);
    }

    #[test]
    fn strips_v2_params_and_drops_empty_query() {
        let signed = "https://s3.amazonaws.com/b/app.css?AWSAccessKeyId=AKIA&Signature=x%3D&Expires=9";
        assert_eq!(
            strip_signed_params(signed),
            "https://s3.amazonaws.com/b/app.css"
        );
    }

    #[test]
    fn signing_storage_urls_are_stripped() {
        let storage = ObjectStoreStorage::new("https://bucket.s3.amazonaws.com/")
            .with_presigner(|url| format!("{url}?X-Amz-Date=20240101&X-Amz-Signature=abc"));
        let b = UrlBuilder::new("bundles/", Arc::new(storage));

        assert_eq!(
            b.url_for(&AssetDescriptor::new("main.js")),
            "https://bucket.s3.amazonaws.com/bundles/main.js"
        );
    }

    #[test]
    fn netloc_of_absolute_and_relative_urls() {
        assert_eq!(netloc("https://cdn.example.com/main.js"), "cdn.example.com");
        assert_eq!(netloc("http://localhost:3000/main.js"), "localhost:3000");
        assert_eq!(netloc("//cdn.example.com/main.js"), "cdn.example.com");
        assert_eq!(netloc("/static/main.js"), "");
        assert_eq!(netloc("main.js"), "");
    }

    #[test]
    fn netloc_keeps_explicit_default_ports() {
        assert_eq!(netloc("https://example.com:443/main.js"), "example.com:443");
        assert_eq!(netloc("http://example.com:80"), "example.com:80");
        assert_eq!(netloc("//example.com:443/main.js?v=1"), "example.com:443");
    }

    #[test]
    fn netloc_drops_userinfo_and_stops_at_query() {
        assert_eq!(netloc("https://user:pw@cdn.example.com/main.js"), "cdn.example.com");
        assert_eq!(netloc("https://cdn.example.com?v=2"), "cdn.example.com");
        assert_eq!(netloc("https://Cdn.Example.com#top"), "Cdn.Example.com");
    }
}
