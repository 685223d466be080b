use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Images,
    Documents,
    Data,
    Archives,
    Media,
    Others,
}

// The one extension table. Uploads are allowed for exactly the extensions
// listed here; everything else is `Others`.
const CATEGORY_TABLE: [(Category, &[&str]); 5] = [
    (
        Category::Images,
        &["png", "jpg", "jpeg", "gif", "bmp", "webp", "svg", "ico"],
    ),
    (
        Category::Documents,
        &["txt", "pdf", "doc", "docx", "xls", "xlsx", "ppt", "pptx"],
    ),
    (Category::Data, &["csv", "json", "xml"]),
    (Category::Archives, &["zip", "rar", "7z"]),
    (Category::Media, &["mp3", "mp4", "avi", "mov", "wmv"]),
];

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Images,
        Category::Documents,
        Category::Data,
        Category::Archives,
        Category::Media,
        Category::Others,
    ];

    /// Expects an already lowercased extension without the dot.
    pub fn from_extension(extension: &str) -> Category {
        CATEGORY_TABLE
            .iter()
            .find(|(_, extensions)| extensions.contains(&extension))
            .map(|(category, _)| *category)
            .unwrap_or(Category::Others)
    }

    pub fn classify(filename: &str) -> Category {
        extension_of(filename)
            .map(|ext| Category::from_extension(&ext))
            .unwrap_or(Category::Others)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::Images => "Images",
            Category::Documents => "Documents",
            Category::Data => "Data",
            Category::Archives => "Archives",
            Category::Media => "Media",
            Category::Others => "Others",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Images => write!(f, "images"),
            Category::Documents => write!(f, "documents"),
            Category::Data => write!(f, "data"),
            Category::Archives => write!(f, "archives"),
            Category::Media => write!(f, "media"),
            Category::Others => write!(f, "others"),
        }
    }
}

/// Lowercased text after the final `.`, `None` when the name has no dot.
pub fn extension_of(filename: &str) -> Option<String> {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
}

/// The lowercased extension of `filename` if it may be uploaded.
pub fn allowed_extension(filename: &str) -> Option<String> {
    extension_of(filename).filter(|ext| Category::from_extension(ext) != Category::Others)
}
