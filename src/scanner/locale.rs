use crate::index::ModuleIndex;
use crate::models::{LocaleConfidence, ModuleEvidence, ModuleName, ScannerKind};

use super::{ArchiveView, Scanner};

const DEFINITE_CLASSES: &[&str] = &["java/util/spi/LocaleServiceProvider"];
const STRONG_CLASSES: &[&str] = &["java/util/Locale", "java/text/DateFormat", "java/text/NumberFormat"];
const POSSIBLE_CLASSES: &[&str] = &["java/util/ResourceBundle"];

/// Three-tier locale/i18n usage detector. `Definite` evidence (an explicit
/// SPI provider reference) is the only tier that adds `jdk.localedata`;
/// `Strong`/`Possible` are recorded as evidence without pulling the module
/// in, since most locale-aware code runs fine against the built-in root
/// locale data.
pub struct LocaleScanner;

impl Scanner for LocaleScanner {
    fn kind(&self) -> ScannerKind {
        ScannerKind::Locale
    }

    fn scan(&self, view: &ArchiveView, _index: &ModuleIndex) -> ModuleEvidence {
        let mut evidence = ModuleEvidence::empty();
        let mut confidence = None;

        for class in view.classes {
            for class_ref in &class.class_refs {
                let tier = if DEFINITE_CLASSES.contains(&class_ref.as_str()) {
                    Some(LocaleConfidence::Definite)
                } else if STRONG_CLASSES.contains(&class_ref.as_str()) {
                    Some(LocaleConfidence::Strong)
                } else if POSSIBLE_CLASSES.contains(&class_ref.as_str()) {
                    Some(LocaleConfidence::Possible)
                } else {
                    None
                };

                if let Some(tier) = tier {
                    evidence.add_pattern(class_ref.clone());
                    confidence = Some(confidence.map_or(tier, |current: LocaleConfidence| current.max(tier)));
                }
            }
        }

        evidence.confidence = confidence;
        if confidence == Some(LocaleConfidence::Definite) {
            evidence.add_module(ModuleName::new("jdk.localedata"));
        }

        evidence
    }
}
