use crate::models::category::Category;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Stored names grouped by category, each bucket in directory order.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CategorizedListing {
    pub images: Vec<String>,
    pub documents: Vec<String>,
    pub data: Vec<String>,
    pub archives: Vec<String>,
    pub media: Vec<String>,
    pub others: Vec<String>,
}

impl CategorizedListing {
    pub fn new() -> CategorizedListing {
        CategorizedListing::default()
    }

    pub fn push(&mut self, name: String) {
        self.bucket_mut(Category::classify(&name)).push(name);
    }

    pub fn bucket(&self, category: Category) -> &[String] {
        match category {
            Category::Images => &self.images,
            Category::Documents => &self.documents,
            Category::Data => &self.data,
            Category::Archives => &self.archives,
            Category::Media => &self.media,
            Category::Others => &self.others,
        }
    }

    fn bucket_mut(&mut self, category: Category) -> &mut Vec<String> {
        match category {
            Category::Images => &mut self.images,
            Category::Documents => &mut self.documents,
            Category::Data => &mut self.data,
            Category::Archives => &mut self.archives,
            Category::Media => &mut self.media,
            Category::Others => &mut self.others,
        }
    }

    pub fn len(&self) -> usize {
        Category::ALL.iter().map(|c| self.bucket(*c).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_routes_to_bucket() {
        let mut listing = CategorizedListing::new();
        listing.push("a.png".to_string());
        listing.push("b.docx".to_string());
        listing.push("c".to_string());
        listing.push("d.PNG".to_string());

        assert_eq!(listing.images, vec!["a.png", "d.PNG"]);
        assert_eq!(listing.documents, vec!["b.docx"]);
        assert_eq!(listing.others, vec!["c"]);
        assert_eq!(listing.len(), 4);
    }

    #[test]
    fn test_serializes_all_buckets() {
        let json = serde_json::to_value(CategorizedListing::new()).unwrap();
        for category in Category::ALL {
            assert_eq!(json[category.to_string()], serde_json::json!([]));
        }
    }
}
