//! PC build accumulator
//!
//! [`Builder`] answers the questions an interactive build flow asks
//! (which sockets exist, which CPUs fit a socket, ...) and
//! [`BuildSelection`] holds the chosen product per slot.

mod selection;

pub use selection::{BuildSelection, BuildSlot, BuildTotals};

use crate::catalog::{Catalog, ExtractMode, LazyProduct};
use crate::model::{COMPONENTS_CATEGORY, CPU_SUBCATEGORY, RAM_SUBCATEGORY};
use crate::CatalogError;
use std::fmt;
use std::str::FromStr;

const SOFTWARE_CATEGORY: &str = "hugbunadur";
const WINDOWS_SUBCATEGORY: &str = "microsoft-windows";
const MOTHERBOARD_SUBCATEGORY: &str = "modurbord";
const STORAGE_SUBCATEGORY: &str = "gagnageymsla";
const CASE_SUBCATEGORY: &str = "kassar";
const PSU_SUBCATEGORY: &str = "aflgjafar";

/// The two kinds of drive the storage slot accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriveKind {
    Ssd,
    Hdd,
}

impl DriveKind {
    /// Listing path segment for this kind under the storage subcategory
    pub fn subsubcategory(&self) -> &'static str {
        match self {
            Self::Ssd => "ssd-diskar",
            Self::Hdd => "hardir-diskar",
        }
    }
}

impl FromStr for DriveKind {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ssd" => Ok(Self::Ssd),
            "hdd" => Ok(Self::Hdd),
            other => Err(CatalogError::Validation(format!(
                "Unknown drive kind '{}', expected 'ssd' or 'hdd'",
                other
            ))),
        }
    }
}

impl fmt::Display for DriveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ssd => write!(f, "ssd"),
            Self::Hdd => write!(f, "hdd"),
        }
    }
}

/// Catalog queries for each build slot
#[derive(Debug, Clone)]
pub struct Builder {
    catalog: Catalog,
}

impl Builder {
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Available CPU sockets
    pub fn sockets(&self) -> Result<Vec<&str>, CatalogError> {
        Ok(self.catalog.categories().sockets()?)
    }

    /// Available desktop memory types
    pub fn ram_types(&self) -> Result<Vec<&str>, CatalogError> {
        Ok(self.catalog.categories().ram_types()?)
    }

    pub async fn operating_systems(&self) -> Result<Vec<LazyProduct>, CatalogError> {
        self.catalog
            .list_products(SOFTWARE_CATEGORY, WINDOWS_SUBCATEGORY, None, ExtractMode::Quick)
            .await
    }

    pub async fn cpus(&self, socket: &str) -> Result<Vec<LazyProduct>, CatalogError> {
        self.require_socket(socket)?;
        self.catalog
            .list_products(COMPONENTS_CATEGORY, CPU_SUBCATEGORY, Some(socket), ExtractMode::Quick)
            .await
    }

    pub async fn motherboards(&self, socket: &str) -> Result<Vec<LazyProduct>, CatalogError> {
        self.require_socket(socket)?;
        self.catalog
            .list_products(
                COMPONENTS_CATEGORY,
                MOTHERBOARD_SUBCATEGORY,
                Some(socket),
                ExtractMode::Quick,
            )
            .await
    }

    pub async fn memory(&self, ram_type: &str) -> Result<Vec<LazyProduct>, CatalogError> {
        if !self.ram_types()?.contains(&ram_type) {
            return Err(CatalogError::Validation(format!(
                "Unknown memory type '{}'",
                ram_type
            )));
        }
        self.catalog
            .list_products(COMPONENTS_CATEGORY, RAM_SUBCATEGORY, Some(ram_type), ExtractMode::Quick)
            .await
    }

    /// Drives of the given kind; `kind` is `"ssd"` or `"hdd"`
    pub async fn storage(&self, kind: &str) -> Result<Vec<LazyProduct>, CatalogError> {
        let kind: DriveKind = kind.parse()?;
        self.catalog
            .list_products(
                COMPONENTS_CATEGORY,
                STORAGE_SUBCATEGORY,
                Some(kind.subsubcategory()),
                ExtractMode::Quick,
            )
            .await
    }

    pub async fn cases(&self) -> Result<Vec<LazyProduct>, CatalogError> {
        self.catalog
            .list_products(COMPONENTS_CATEGORY, CASE_SUBCATEGORY, None, ExtractMode::Quick)
            .await
    }

    pub async fn psus(&self) -> Result<Vec<LazyProduct>, CatalogError> {
        self.catalog
            .list_products(COMPONENTS_CATEGORY, PSU_SUBCATEGORY, None, ExtractMode::Quick)
            .await
    }

    fn require_socket(&self, socket: &str) -> Result<(), CatalogError> {
        if self.sockets()?.contains(&socket) {
            Ok(())
        } else {
            Err(CatalogError::Validation(format!("Unknown socket '{}'", socket)))
        }
    }
}
