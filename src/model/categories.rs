#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Low,
    Medium,
    High,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Low, Category::Medium, Category::High];

    pub fn name(self) -> &'static str {
        match self {
            Category::Low => "low",
            Category::Medium => "medium",
            Category::High => "high",
        }
    }

    pub fn from_name(name: &str) -> Option<Category> {
        match name {
            "low" => Some(Category::Low),
            "medium" => Some(Category::Medium),
            "high" => Some(Category::High),
            _ => None,
        }
    }
}
