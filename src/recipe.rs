use std::fs;
use std::path::{Path, PathBuf};

/// One file found under the recipe directory. `title` is the raw file name
/// and doubles as the lookup key; the display form comes from [`Recipe::name`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipe {
    pub title: String,
    pub path: PathBuf,
}

impl Recipe {
    /// Display form of the raw file name: underscores become spaces and each
    /// word gets a capital first letter.
    pub fn name(&self) -> String {
        self.title
            .split('_')
            .map(capitalize)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Reads the backing file and renders it as an HTML fragment: the content
    /// is escaped, then each newline becomes `<br />`. A failed read degrades
    /// to a placeholder naming the recipe rather than an error.
    pub fn body_html(&self) -> String {
        match fs::read_to_string(&self.path) {
            Ok(data) => escape_html(&data).replace('\n', "<br />"),
            Err(e) => {
                log::warn!("failed to read recipe file {}: {}", self.path.display(), e);
                format!("Unable to get recipe: {}", self.name())
            }
        }
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Walks `root` depth first and produces one entry per regular file, in
/// lexicographic order within each directory. Unreadable directories are
/// logged and skipped, so a failed walk still yields whatever was collected.
pub fn scan_recipes<P: AsRef<Path>>(root: P) -> Vec<Recipe> {
    let mut recipes = Vec::new();
    walk(root.as_ref(), &mut recipes);
    recipes
}

fn walk(dir: &Path, recipes: &mut Vec<Recipe>) {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            log::warn!("error walking recipes under {}: {}", dir.display(), e);
            return;
        }
    };
    let mut paths = Vec::new();
    for entry in entries {
        match entry {
            Ok(entry) => paths.push(entry.path()),
            Err(e) => log::warn!("error walking recipes under {}: {}", dir.display(), e),
        }
    }
    paths.sort();
    for path in paths {
        if path.is_dir() {
            walk(&path, recipes);
        } else {
            let title = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            recipes.push(Recipe { title, path });
        }
    }
}

/// First entry whose raw title matches `title` byte for byte, if any.
pub fn find_by_title<'a>(recipes: &'a [Recipe], title: &str) -> Option<&'a Recipe> {
    recipes.iter().find(|r| r.title == title)
}
