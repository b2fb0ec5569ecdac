use rustc_hash::FxHashMap;

use crate::model::Commit;

use super::selection::Selectable;

/// Number of distinct colors before the palette cycles
pub const PALETTE_SIZE: usize = 10;

/// Ordinal color assignment: each language gets the next slot the first time it is seen
#[derive(Debug, Clone, Default)]
pub struct LanguagePalette {
    slots: FxHashMap<String, usize>,
}

impl LanguagePalette {
    pub fn slot(&mut self, language: &str) -> usize {
        if let Some(&slot) = self.slots.get(language) {
            return slot;
        }
        let slot = self.slots.len() % PALETTE_SIZE;
        self.slots.insert(language.to_string(), slot);
        slot
    }
}

/// One file's lines within the filtered commits
#[derive(Debug, Clone, PartialEq)]
pub struct FileLines {
    pub path: String,
    /// Palette slot of every line, in ingestion order
    pub line_slots: Vec<usize>,
}

impl FileLines {
    pub fn line_count(&self) -> usize {
        self.line_slots.len()
    }
}

/// ViewModel for the per-file line listing
pub struct FilesViewModel {
    files: Vec<FileLines>,
    /// Languages present in `files`, first-seen order
    languages: Vec<String>,
    palette: LanguagePalette,
    selected_index: usize,
}

impl FilesViewModel {
    pub fn new() -> Self {
        Self {
            files: Vec::new(),
            languages: Vec::new(),
            palette: LanguagePalette::default(),
            selected_index: 0,
        }
    }

    /// Rebuild from scratch for the given commits; palette slots persist across rebuilds
    pub fn rebuild<'a>(&mut self, commits: impl Iterator<Item = &'a Commit>) {
        let mut index: FxHashMap<&str, usize> = FxHashMap::default();
        let mut files: Vec<FileLines> = Vec::new();
        let mut languages: Vec<String> = Vec::new();

        for line in commits.flat_map(|c| c.lines()) {
            if !languages.contains(&line.kind) {
                languages.push(line.kind.clone());
            }
            let slot = self.palette.slot(&line.kind);
            let i = *index.entry(line.file.as_str()).or_insert_with(|| {
                files.push(FileLines { path: line.file.clone(), line_slots: Vec::new() });
                files.len() - 1
            });
            files[i].line_slots.push(slot);
        }

        files.sort_by(|a, b| b.line_count().cmp(&a.line_count()));
        self.files = files;
        self.languages = languages;
        self.selected_index = self.selected_index.min(self.files.len().saturating_sub(1));
    }

    pub fn files(&self) -> &[FileLines] {
        &self.files
    }

    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    pub fn total_lines(&self) -> usize {
        self.files.iter().map(FileLines::line_count).sum()
    }

    /// Languages of the listed files in palette order, for the legend
    pub fn legend(&self) -> Vec<(&str, usize)> {
        let mut legend: Vec<(&str, usize)> = self
            .languages
            .iter()
            .filter_map(|language| {
                self.palette.slots.get(language).map(|&slot| (language.as_str(), slot))
            })
            .collect();
        legend.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(b.0)));
        legend
    }
}

impl Default for FilesViewModel {
    fn default() -> Self {
        Self::new()
    }
}

impl Selectable for FilesViewModel {
    fn len(&self) -> usize {
        self.files.len()
    }

    fn selected(&self) -> usize {
        self.selected_index
    }

    fn set_selected(&mut self, index: usize) {
        self.selected_index = index;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LineEdit, aggregate_commits};
    use time::macros::datetime;

    fn commits() -> Vec<Commit> {
        let early = datetime!(2024-03-04 2:00 UTC);
        let late = datetime!(2024-03-05 14:30 UTC);
        let edits = vec![
            LineEdit::new("a", "index.html", 1, "html", "x", early),
            LineEdit::new("a", "style.css", 1, "css", "x", early),
            LineEdit::new("b", "style.css", 2, "css", "x", late),
            LineEdit::new("b", "style.css", 3, "css", "x", late),
            LineEdit::new("b", "main.js", 1, "js", "x", late),
        ];
        aggregate_commits(&edits, "")
    }

    #[test]
    fn test_files_sorted_by_line_count() {
        let commits = commits();
        let mut vm = FilesViewModel::new();
        vm.rebuild(commits.iter());

        let paths: Vec<_> = vm.files().iter().map(|f| f.path.as_str()).collect();
        assert_eq!(paths, ["style.css", "index.html", "main.js"]);
        assert_eq!(vm.files()[0].line_count(), 3);
        assert_eq!(vm.total_lines(), 5);
    }

    #[test]
    fn test_rebuild_on_subset() {
        let commits = commits();
        let mut vm = FilesViewModel::new();
        vm.rebuild(commits.iter());
        vm.select(2);

        vm.rebuild(commits[..1].iter());
        assert_eq!(vm.files().len(), 2);
        assert_eq!(vm.total_lines(), 2);
        assert_eq!(vm.selected_index(), 1);
    }

    #[test]
    fn test_palette_is_stable_across_rebuilds() {
        let commits = commits();
        let mut vm = FilesViewModel::new();
        vm.rebuild(commits.iter());
        let css_slot = vm.files()[0].line_slots[0];

        vm.rebuild(commits[1..].iter());
        let css = vm.files().iter().find(|f| f.path == "style.css").unwrap();
        assert!(css.line_slots.iter().all(|&s| s == css_slot));

        assert_eq!(vm.legend(), [("css", 1), ("js", 2)]);
    }

    #[test]
    fn test_legend_lists_only_present_languages() {
        let commits = commits();
        let mut vm = FilesViewModel::new();
        vm.rebuild(commits.iter());
        assert_eq!(vm.legend(), [("html", 0), ("css", 1), ("js", 2)]);

        vm.rebuild(commits[..1].iter());
        assert_eq!(vm.legend(), [("html", 0), ("css", 1)]);

        vm.rebuild(std::iter::empty::<&Commit>());
        assert!(vm.legend().is_empty());

        // Languages coming back keep their original slots
        vm.rebuild(commits[1..].iter());
        assert_eq!(vm.legend(), [("css", 1), ("js", 2)]);
    }

    #[test]
    fn test_palette_cycles() {
        let mut palette = LanguagePalette::default();
        for i in 0..PALETTE_SIZE {
            assert_eq!(palette.slot(&format!("lang{}", i)), i);
        }
        assert_eq!(palette.slot("eleventh"), 0);
        assert_eq!(palette.slot("lang3"), 3);
    }
}
