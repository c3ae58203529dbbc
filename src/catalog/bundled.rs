use rust_embed::Embed;

use crate::catalog::{Catalog, CatalogError, Locale};

#[derive(Embed)]
#[folder = "assets/glossary/"]
struct GlossaryAssets;

impl Catalog {
    /// The glossary shipped with the binary for `locale`.
    pub fn bundled(locale: Locale) -> Result<Self, CatalogError> {
        let filename = format!("{}.json", locale.as_str());
        let file = GlossaryAssets::get(&filename).ok_or(CatalogError::MissingBundled(locale))?;
        Self::from_json_slice(file.data.as_ref())
    }
}
