use crate::ScrapeError;

/// Top-level category holding the PC components
pub const COMPONENTS_CATEGORY: &str = "tolvuihlutir";

/// Subcategory whose children are CPU sockets
pub const CPU_SUBCATEGORY: &str = "orgjorvar";

/// Subcategory whose children are desktop memory types
pub const RAM_SUBCATEGORY: &str = "vinnsluminni-bordtolvur";

/// Cooling entries the shop files next to the CPU sockets
pub const COOLING_EXCLUSIONS: &[&str] = &["orgjorvakaelingar", "kaelikrem"];

/// The shop's category → subcategory → sub-subcategory taxonomy
///
/// Every level keeps the order entries were first seen in the navigation
/// menu. Built once at startup and read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryTree {
    categories: Vec<Category>,
}

/// A top-level category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub name: String,
    pub subcategories: Vec<Subcategory>,
}

/// A subcategory and its ordered sub-subcategories
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subcategory {
    pub name: String,
    pub children: Vec<String>,
}

impl CategoryTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a category if it is not there yet
    pub fn add_category(&mut self, name: &str) -> &mut Category {
        let index = match self.categories.iter().position(|c| c.name == name) {
            Some(index) => index,
            None => {
                self.categories.push(Category {
                    name: name.to_string(),
                    subcategories: Vec::new(),
                });
                self.categories.len() - 1
            }
        };
        &mut self.categories[index]
    }

    /// Records a menu entry
    ///
    /// Repeated subcategory names merge into one entry; `child`, when given,
    /// is appended to that subcategory's sequence.
    pub fn insert(&mut self, category: &str, subcategory: &str, child: Option<&str>) {
        let category = self.add_category(category);

        let index = match category
            .subcategories
            .iter()
            .position(|s| s.name == subcategory)
        {
            Some(index) => index,
            None => {
                category.subcategories.push(Subcategory {
                    name: subcategory.to_string(),
                    children: Vec::new(),
                });
                category.subcategories.len() - 1
            }
        };

        if let Some(child) = child {
            category.subcategories[index].children.push(child.to_string());
        }
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }

    /// Sub-subcategories of `category/subcategory`, unfiltered
    pub fn children(&self, category: &str, subcategory: &str) -> Option<&[String]> {
        self.category(category)?
            .subcategories
            .iter()
            .find(|s| s.name == subcategory)
            .map(|s| s.children.as_slice())
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Available CPU sockets, without the cooling entries
    pub fn sockets(&self) -> Result<Vec<&str>, ScrapeError> {
        self.filtered_children(COMPONENTS_CATEGORY, CPU_SUBCATEGORY)
    }

    /// Available desktop memory types, without the cooling entries
    pub fn ram_types(&self) -> Result<Vec<&str>, ScrapeError> {
        self.filtered_children(COMPONENTS_CATEGORY, RAM_SUBCATEGORY)
    }

    fn filtered_children(&self, category: &str, subcategory: &str) -> Result<Vec<&str>, ScrapeError> {
        self.children(category, subcategory)
            .map(exclude_cooling)
            .ok_or_else(|| ScrapeError::MissingCategory {
                path: format!("{}/{}", category, subcategory),
            })
    }
}

/// Drops the [`COOLING_EXCLUSIONS`] entries, keeping order
pub fn exclude_cooling(names: &[String]) -> Vec<&str> {
    names
        .iter()
        .map(String::as_str)
        .filter(|name| !COOLING_EXCLUSIONS.contains(name))
        .collect()
}
