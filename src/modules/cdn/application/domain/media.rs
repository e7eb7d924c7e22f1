use std::fmt;

use uuid::Uuid;

pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;
pub const MAX_UPLOAD_BYTES: usize = 100 * 1024 * 1024;

/// Prefix under which stored files are served.
pub const PUBLIC_PREFIX: &str = "/api/cdn/";

const IMAGE_TYPES: &[(&str, &str)] = &[
    ("image/jpeg", "jpg"),
    ("image/png", "png"),
    ("image/gif", "gif"),
    ("image/webp", "webp"),
];

const VIDEO_TYPES: &[(&str, &str)] = &[
    ("video/mp4", "mp4"),
    ("video/webm", "webm"),
    ("video/quicktime", "mov"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    /// Classify an upload by its declared content type. Anything else is rejected.
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        let ct = normalize(content_type);
        if IMAGE_TYPES.iter().any(|(t, _)| *t == ct) {
            Some(MediaKind::Image)
        } else if VIDEO_TYPES.iter().any(|(t, _)| *t == ct) {
            Some(MediaKind::Video)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Video => "video",
        }
    }
}

/// Top-level folders readable without authentication.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublicFolder {
    Images,
    Reviews,
}

impl PublicFolder {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "images" => Some(PublicFolder::Images),
            "reviews" => Some(PublicFolder::Reviews),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PublicFolder::Images => "images",
            PublicFolder::Reviews => "reviews",
        }
    }
}

fn normalize(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

pub fn is_allowed_image(content_type: &str) -> bool {
    MediaKind::from_content_type(content_type) == Some(MediaKind::Image)
}

/// File extension derived from the content type, not from the client's file name.
pub fn extension_for(content_type: &str) -> Option<&'static str> {
    let ct = normalize(content_type);
    IMAGE_TYPES
        .iter()
        .chain(VIDEO_TYPES)
        .find(|(t, _)| *t == ct)
        .map(|(_, ext)| *ext)
}

pub fn content_type_for(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "mp4" => "video/mp4",
        "webm" => "video/webm",
        "mov" => "video/quicktime",
        _ => "application/octet-stream",
    }
}

/// A single path segment with no separators, parent references or hidden names.
pub fn is_safe_file_name(name: &str) -> bool {
    !name.is_empty()
        && name.len() <= 255
        && !name.starts_with('.')
        && !name.contains(['/', '\\', '\0'])
        && !name.contains("..")
}

/// Relative location of a stored file, e.g. `images/<uuid>.png` or `videos/3/<uuid>.mp4`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StorageKey(String);

impl StorageKey {
    /// Build a key from already validated segments.
    pub fn new<I, S>(segments: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut parts = Vec::new();
        for segment in segments {
            let segment = segment.as_ref();
            if !is_safe_file_name(segment) {
                return None;
            }
            parts.push(segment.to_string());
        }
        if parts.is_empty() {
            return None;
        }
        Some(Self(parts.join("/")))
    }

    /// Fresh random file name inside `folder`.
    pub fn generate(folder: &[&str], extension: &str) -> Option<Self> {
        let file_name = format!("{}.{}", Uuid::new_v4(), extension);
        Self::new(folder.iter().copied().chain(std::iter::once(file_name.as_str())))
    }

    /// Inverse of [`StorageKey::public_url`]. Returns `None` for foreign URLs.
    pub fn from_public_url(url: &str) -> Option<Self> {
        let rest = url.strip_prefix(PUBLIC_PREFIX)?;
        Self::new(rest.split('/'))
    }

    pub fn public_url(&self) -> String {
        format!("{PUBLIC_PREFIX}{}", self.0)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn file_name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/')
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
