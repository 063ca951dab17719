//! Object naming rules for the showroom logo bucket.
//!
//! Objects live flat inside a bucket and are addressed by a public URL of the
//! form `{base}/storage/{bucket}/{object}`. Logos uploaded before the
//! migration carry the hosted-platform URL shape
//! `.../storage/v1/object/public/{bucket}/{object}`; both are recognised.

use crate::error::CoreError;
use crate::types::DbId;

/// Bucket holding showroom logos.
pub const LOGO_BUCKET: &str = "showroom-logos";

/// URL path prefix under which buckets are served.
pub const PUBLIC_PREFIX: &str = "/storage";

/// Legacy hosted-platform public object marker.
const LEGACY_MARKER: &str = "/storage/v1/object/public/";

/// Accepted logo file extensions (lower-case).
pub const LOGO_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp", "svg"];

/// Extract and validate the extension of an uploaded logo file name.
pub fn logo_extension(file_name: &str) -> Result<String, CoreError> {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default();
    if LOGO_EXTENSIONS.contains(&ext.as_str()) {
        Ok(ext)
    } else {
        Err(CoreError::Validation(format!(
            "Unsupported logo format '.{ext}'. Supported: {LOGO_EXTENSIONS:?}"
        )))
    }
}

/// Object name for a newly uploaded logo: `showroom-{id}-{uuid}.{ext}`.
pub fn logo_object_name(showroom_id: DbId, ext: &str) -> String {
    format!("showroom-{showroom_id}-{}.{ext}", uuid::Uuid::new_v4())
}

/// Public URL of an object.
pub fn public_url(base_url: &str, bucket: &str, object: &str) -> String {
    format!(
        "{}{PUBLIC_PREFIX}/{bucket}/{object}",
        base_url.trim_end_matches('/')
    )
}

/// Recover the object name from a public URL produced by [`public_url`] or by
/// the legacy hosted platform. Returns `None` for foreign URLs.
pub fn object_from_public_url(url: &str, bucket: &str) -> Option<String> {
    let object = key_after_bucket(url, bucket)?;
    is_safe_object_name(object).then(|| object.to_string())
}

/// Like [`object_from_public_url`] but also accepts nested keys (`a/b/c.png`)
/// left behind by the hosted platform. Every segment must be a plain name.
pub fn key_from_public_url(url: &str, bucket: &str) -> Option<String> {
    let key = key_after_bucket(url, bucket)?;
    key.split('/')
        .all(is_safe_object_name)
        .then(|| key.to_string())
}

fn key_after_bucket<'a>(url: &'a str, bucket: &str) -> Option<&'a str> {
    let current = format!("{PUBLIC_PREFIX}/{bucket}/");
    let legacy = format!("{LEGACY_MARKER}{bucket}/");
    [legacy, current].iter().find_map(|marker| {
        url.find(marker.as_str())
            .map(|idx| &url[idx + marker.len()..])
    })
}

/// Objects are flat names: no separators, no parent references, not empty.
pub fn is_safe_object_name(name: &str) -> bool {
    !name.is_empty()
        && !name.contains('/')
        && !name.contains('\\')
        && name != "."
        && name != ".."
}

/// Target name when flattening a nested object: the first path segment.
///
/// Returns `None` when the object is already flat.
pub fn flattened_name(name: &str) -> Option<&str> {
    let (first, _) = name.split_once('/')?;
    (!first.is_empty()).then_some(first)
}
