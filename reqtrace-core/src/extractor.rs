//! Requirement graph construction
//!
//! Rows are ingested one at a time into a [`RequirementRegistry`]. Each row
//! anchors its parent and functional-child references to the requirement
//! named in its ID column; a row without an ID contributes nothing.
//! [`RequirementExtractor::finalize`] then settles each requirement on a
//! single description, asking a [`Resolver`] where the workbook disagrees.

use crate::columns::ColumnMap;
use crate::config::ExtractorConfig;
use crate::error::ExtractError;
use crate::models::RequirementRegistry;
use crate::references::{parse_child_references, parse_parent_reference};
use crate::resolver::Resolver;
use crate::workbook::{Sheet, Workbook};

/// Counters collected during ingestion
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestStats {
    pub sheets: usize,
    pub rows: usize,
    /// Rows without a requirement ID
    pub skipped_rows: usize,
    /// Parent/child links recorded for the first time
    pub links: usize,
}

/// A description picked by the resolver
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedText {
    pub id: String,
    /// 1-based position in the candidate list
    pub choice: usize,
    pub text: String,
}

/// Outcome of finalization
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FinalizeReport {
    /// Requirements tracing to more than one parent
    pub multiple_parents: Vec<String>,
    /// Requirements whose description had to be chosen
    pub resolved: Vec<ResolvedText>,
}

#[derive(Debug, Default)]
pub struct RequirementExtractor {
    config: ExtractorConfig,
    registry: RequirementRegistry,
    stats: IngestStats,
}

impl RequirementExtractor {
    pub fn new(config: ExtractorConfig) -> Self {
        Self {
            config,
            registry: RequirementRegistry::new(),
            stats: IngestStats::default(),
        }
    }

    pub fn registry(&self) -> &RequirementRegistry {
        &self.registry
    }

    pub fn into_registry(self) -> RequirementRegistry {
        self.registry
    }

    pub fn stats(&self) -> &IngestStats {
        &self.stats
    }

    /// Ingests every sheet in workbook order
    pub fn ingest_workbook(&mut self, workbook: &Workbook) {
        for sheet in &workbook.sheets {
            self.ingest_sheet(sheet);
        }
        log::info!(
            "Ingested {} sheets, {} rows ({} without ID), {} requirements",
            self.stats.sheets,
            self.stats.rows,
            self.stats.skipped_rows,
            self.registry.len()
        );
    }

    /// Ingests the data rows of one sheet, top to bottom
    pub fn ingest_sheet(&mut self, sheet: &Sheet) {
        let columns = ColumnMap::from_headers(sheet.headers());
        if !columns.contains(&self.config.id_column) {
            log::warn!(
                "Sheet '{}' has no '{}' column, skipping",
                sheet.title,
                self.config.id_column
            );
        }

        for row in sheet.data_rows() {
            self.ingest_row(&sheet.title, row, &columns);
        }
        self.stats.sheets += 1;
        log::debug!("Sheet '{}': {} data rows", sheet.title, sheet.data_rows().len());
    }

    /// Merges one row into the registry.
    ///
    /// Returns false when the row has no requirement ID and was skipped.
    pub fn ingest_row<S: AsRef<str>>(
        &mut self,
        sheet_name: &str,
        row: &[S],
        columns: &ColumnMap,
    ) -> bool {
        self.stats.rows += 1;

        let subject_id = match columns
            .cell(row, &self.config.id_column)
            .map(str::trim)
            .filter(|id| !id.is_empty())
        {
            Some(id) => id.to_string(),
            None => {
                self.stats.skipped_rows += 1;
                return false;
            }
        };

        let subject = self.registry.get_or_create(&subject_id);

        let text_column = self.config.text_column(sheet_name);
        if let Some(text) = columns.cell(row, &text_column) {
            subject.add_text(text.trim());
        }

        if let Some(cell) = columns.cell(row, &self.config.parent_column) {
            if let Some(parent) = parse_parent_reference(cell) {
                self.registry.add_text(&parent.id, &parent.text);
                if self.registry.link(&parent.id, &subject_id) {
                    self.stats.links += 1;
                }
            }
        }

        if let Some(cell) = columns.cell(row, &self.config.child_column) {
            for child in parse_child_references(cell) {
                self.registry.add_text(&child.id, &child.text);
                if self.registry.link(&subject_id, &child.id) {
                    self.stats.links += 1;
                }
            }
        }

        true
    }

    /// Settles every requirement on at most one description.
    ///
    /// Requirements with one candidate take it directly. Requirements with
    /// several are handed to the resolver one at a time, in registry order,
    /// until it returns a choice in range.
    pub fn finalize(&mut self, resolver: &mut dyn Resolver) -> Result<FinalizeReport, ExtractError> {
        let mut report = FinalizeReport::default();

        for req in self.registry.iter_mut() {
            if req.has_multiple_parents() {
                report.multiple_parents.push(req.id.clone());
            }
            if req.texts.len() <= 1 {
                let only = req.texts.first().cloned();
                req.set_text(only);
            }
        }

        if !report.multiple_parents.is_empty() {
            for id in &report.multiple_parents {
                log::warn!("{} has multiple parents", id);
            }
            let ids: Vec<&str> = report.multiple_parents.iter().map(String::as_str).collect();
            resolver.notify_multiple_parents(&ids);
        }

        for req in self.registry.iter_mut().filter(|r| r.has_multiple_texts()) {
            let candidates: Vec<String> = req.texts.iter().cloned().collect();
            let choice = loop {
                let choice = resolver
                    .select_text(&req.id, &candidates)
                    .map_err(|source| ExtractError::Resolution {
                        id: req.id.clone(),
                        source,
                    })?;
                if (1..=candidates.len()).contains(&choice) {
                    break choice;
                }
                log::warn!(
                    "Choice {} for {} is out of range 1..={}",
                    choice,
                    req.id,
                    candidates.len()
                );
            };

            let text = candidates[choice - 1].clone();
            log::debug!("{}: selected text {}", req.id, choice);
            req.set_text(Some(text.clone()));
            report.resolved.push(ResolvedText {
                id: req.id.clone(),
                choice,
                text,
            });
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::{FirstTextResolver, ScriptedResolver};

    const HEADERS: [&str; 4] = ["Req ID", "System Requirement Text", "Parent", "Functional Child"];

    fn columns() -> ColumnMap {
        ColumnMap::from_headers(&HEADERS)
    }

    #[test]
    fn test_row_without_id_is_skipped() {
        let mut extractor = RequirementExtractor::default();
        let row = ["", "Orphan text", "pre\nSYS-P-001: Parent", "SYS-C-001: Child"];

        assert!(!extractor.ingest_row("System", &row, &columns()));
        assert!(extractor.registry().is_empty());
        assert_eq!(extractor.stats().skipped_rows, 1);
    }

    #[test]
    fn test_row_text_goes_to_subject() {
        let mut extractor = RequirementExtractor::default();
        let row = ["SYS-A-001", "Do X", "", ""];

        assert!(extractor.ingest_row("System", &row, &columns()));
        let req = extractor.registry().get("SYS-A-001").unwrap();
        assert!(req.texts.contains("Do X"));
        assert!(req.parents.is_empty());
        assert!(req.children.is_empty());
    }

    #[test]
    fn test_text_column_is_sheet_specific() {
        let mut extractor = RequirementExtractor::default();
        let row = ["SYS-A-001", "Do X", "", ""];

        // "System Requirement Text" does not belong to a sheet named "Software"
        extractor.ingest_row("Software", &row, &columns());
        assert!(extractor.registry().get("SYS-A-001").unwrap().texts.is_empty());
    }

    #[test]
    fn test_missing_optional_columns() {
        let mut extractor = RequirementExtractor::default();
        let columns = ColumnMap::from_headers(&["Req ID"]);

        assert!(extractor.ingest_row("Milestones", &["MS-A-001"], &columns));
        assert!(extractor.registry().contains("MS-A-001"));
        assert_eq!(extractor.stats().links, 0);
    }

    #[test]
    fn test_parent_and_children_linked() {
        let mut extractor = RequirementExtractor::default();
        let row = [
            "SYS-A-001",
            "Do X",
            "Derived from\nSYS-P-001: Top level",
            "SYS-C-001: First child\nSYS-C-002: Second child",
        ];
        extractor.ingest_row("System", &row, &columns());

        let registry = extractor.registry();
        assert_eq!(registry.len(), 4);
        let subject = registry.get("SYS-A-001").unwrap();
        assert!(subject.parents.contains("SYS-P-001"));
        assert!(subject.children.contains("SYS-C-001"));
        assert!(subject.children.contains("SYS-C-002"));
        assert!(registry.get("SYS-P-001").unwrap().children.contains("SYS-A-001"));
        assert!(registry.get("SYS-C-002").unwrap().parents.contains("SYS-A-001"));
        assert!(registry.get("SYS-C-001").unwrap().texts.contains("First child"));
        assert_eq!(extractor.stats().links, 3);
    }

    #[test]
    fn test_single_line_parent_cell_adds_nothing() {
        let mut extractor = RequirementExtractor::default();
        let row = ["SYS-A-001", "Do X", "SYS-P-001: Top level", ""];
        extractor.ingest_row("System", &row, &columns());

        let registry = extractor.registry();
        assert_eq!(registry.len(), 1);
        assert!(!registry.contains("SYS-P-001"));
        assert!(registry.get("SYS-A-001").unwrap().parents.is_empty());
        assert_eq!(extractor.stats().links, 0);
    }

    #[test]
    fn test_row_text_is_trimmed() {
        let mut extractor = RequirementExtractor::default();
        extractor.ingest_row("System", &["SYS-A-001", "Do X", "", ""], &columns());
        extractor.ingest_row("System", &["SYS-A-001", "  Do X \n", "", ""], &columns());
        extractor.ingest_row("System", &["SYS-A-002", "   ", "", ""], &columns());

        let registry = extractor.registry();
        let req = registry.get("SYS-A-001").unwrap();
        assert_eq!(req.texts.len(), 1);
        assert!(req.texts.contains("Do X"));
        assert!(registry.get("SYS-A-002").unwrap().texts.is_empty());
    }

    #[test]
    fn test_finalize_collapses_single_text() {
        let mut extractor = RequirementExtractor::default();
        extractor.ingest_row("System", &["SYS-A-001", "Do X", "", ""], &columns());
        extractor.ingest_row("System", &["SYS-A-001", "Do X", "", ""], &columns());

        let mut resolver = ScriptedResolver::default();
        let report = extractor.finalize(&mut resolver).unwrap();

        assert!(resolver.asked.is_empty());
        assert!(report.resolved.is_empty());
        assert_eq!(extractor.registry().get("SYS-A-001").unwrap().text(), Some("Do X"));
    }

    #[test]
    fn test_finalize_reasks_out_of_range() {
        let mut extractor = RequirementExtractor::default();
        extractor.ingest_row("System", &["SYS-A-001", "Do X", "", ""], &columns());
        extractor.ingest_row("System", &["SYS-A-001", "Do Y", "", ""], &columns());

        let mut resolver = ScriptedResolver::new([0, 3, 2]);
        let report = extractor.finalize(&mut resolver).unwrap();

        assert_eq!(resolver.asked.len(), 3);
        assert_eq!(report.resolved[0].choice, 2);
        assert_eq!(extractor.registry().get("SYS-A-001").unwrap().text(), Some("Do Y"));
    }

    #[test]
    fn test_finalize_resolver_failure() {
        let mut extractor = RequirementExtractor::default();
        extractor.ingest_row("System", &["SYS-A-001", "Do X", "", ""], &columns());
        extractor.ingest_row("System", &["SYS-A-001", "Do Y", "", ""], &columns());

        let mut resolver = ScriptedResolver::default();
        let result = extractor.finalize(&mut resolver);

        assert!(matches!(result, Err(ExtractError::Resolution { ref id, .. }) if id == "SYS-A-001"));
    }

    #[test]
    fn test_finalize_reports_multiple_parents() {
        let mut extractor = RequirementExtractor::default();
        extractor.ingest_row("System", &["SYS-A-001", "", "pre\nSYS-P-001: One", ""], &columns());
        extractor.ingest_row("System", &["SYS-A-001", "", "pre\nSYS-P-002: Two", ""], &columns());

        let mut resolver = FirstTextResolver;
        let report = extractor.finalize(&mut resolver).unwrap();

        assert_eq!(report.multiple_parents, vec!["SYS-A-001".to_string()]);
        assert_eq!(extractor.registry().get("SYS-A-001").unwrap().text(), None);
    }
}
