use std::collections::HashMap;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use geowiki_core::traits::RecordFormat;
use geowiki_core::{Error, GeoEntity, RankedPage, Result};

/// One line per record:
/// `<id> "<name>" "<title>" <wiki> <rank> <order> "<alias|alias>"`,
/// with the rank printed to 10 fractional digits.
pub struct TextFormat;

impl RecordFormat for TextFormat {
    fn name(&self) -> &'static str { "text" }

    fn write_record(&self, out: &mut dyn Write, entity: &GeoEntity, page: &RankedPage) -> Result<()> {
        writeln!(
            out,
            "{} \"{}\" \"{}\" {} {:.10} {} \"{}\"",
            entity.id,
            entity.name,
            page.title,
            entity.wiki,
            page.rank,
            page.order,
            entity.aliases.join("|")
        )?;
        Ok(())
    }
}

/// Maps output file extensions to formats. Lookup is case-insensitive and
/// must succeed before the write stage starts.
pub struct FormatRegistry {
    formats: HashMap<String, Arc<dyn RecordFormat>>,
}

impl Default for FormatRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register("txt", Arc::new(TextFormat));
        registry
    }
}

impl FormatRegistry {
    pub fn empty() -> Self { Self { formats: HashMap::new() } }

    pub fn register(&mut self, extension: &str, format: Arc<dyn RecordFormat>) {
        self.formats.insert(extension.to_ascii_lowercase(), format);
    }

    pub fn extensions(&self) -> Vec<&str> {
        let mut exts: Vec<&str> = self.formats.keys().map(String::as_str).collect();
        exts.sort_unstable();
        exts
    }

    pub fn resolve(&self, path: &Path) -> Result<Arc<dyn RecordFormat>> {
        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or_default();
        self.formats
            .get(&extension.to_ascii_lowercase())
            .cloned()
            .ok_or_else(|| Error::UnsupportedFormat { path: path.to_path_buf(), extension: extension.to_string() })
    }
}
