use serde::{Deserialize, Serialize};

/// A single file inside a mission filesystem. Owned by its parent directory
/// and never mutated after mission start.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VirtualFile {
    pub name: String,
    pub content: String,
    #[serde(default)]
    pub hidden: bool,
    /// Display-only permission string for `ls -l`, e.g. "rwxr--r--".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<String>,
}

impl VirtualFile {
    pub fn new(name: &str, content: &str) -> Self {
        Self {
            name: name.to_string(),
            content: content.to_string(),
            hidden: false,
            permissions: None,
        }
    }

    pub fn hidden(name: &str, content: &str) -> Self {
        Self {
            name: name.to_string(),
            content: content.to_string(),
            hidden: true,
            permissions: None,
        }
    }
}

/// Directory tree rooted at "/". Built once per mission from static content
/// and treated as read-only for the whole session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VirtualDirectory {
    pub name: String,
    #[serde(default)]
    pub files: Vec<VirtualFile>,
    #[serde(default)]
    pub subdirectories: Vec<VirtualDirectory>,
}

impl VirtualDirectory {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            files: Vec::new(),
            subdirectories: Vec::new(),
        }
    }

    pub fn with_files(mut self, files: Vec<VirtualFile>) -> Self {
        self.files = files;
        self
    }

    pub fn with_subdirectories(mut self, subdirectories: Vec<VirtualDirectory>) -> Self {
        self.subdirectories = subdirectories;
        self
    }

    /// Walks path segments from this directory, matching subdirectory names.
    /// Fails closed: first miss returns None.
    pub fn find_directory_by_parts(&self, parts: &[&str]) -> Option<&VirtualDirectory> {
        let mut current = self;
        for part in parts {
            current = current
                .subdirectories
                .iter()
                .find(|dir| dir.name == *part)?;
        }
        Some(current)
    }

    /// Last segment is the filename, the rest names the containing directory.
    pub fn find_file(&self, path: &str) -> Option<&VirtualFile> {
        let parts = split_path(path);
        let (file_name, dir_parts) = parts.split_last()?;
        let target_dir = self.find_directory_by_parts(dir_parts)?;
        target_dir.files.iter().find(|file| file.name == *file_name)
    }

    pub fn directory_exists(&self, path: &str) -> bool {
        self.find_directory_by_parts(&split_path(path)).is_some()
    }

    /// Directory names (slash-suffixed) first, then file names. Hidden files
    /// are skipped unless `show_hidden` is set.
    pub fn list_directory(&self, path: &str, show_hidden: bool) -> Vec<String> {
        let Some(target) = self.find_directory_by_parts(&split_path(path)) else {
            return vec!["Directory not found".to_string()];
        };

        let mut contents: Vec<String> = target
            .subdirectories
            .iter()
            .map(|dir| format!("{}/", dir.name))
            .collect();
        contents.extend(
            target
                .files
                .iter()
                .filter(|file| show_hidden || !file.hidden)
                .map(|file| file.name.clone()),
        );

        if contents.is_empty() {
            vec!["Empty directory".to_string()]
        } else {
            contents
        }
    }

    /// Long-format listing. The permission/owner/date columns are cosmetic
    /// display strings, not filesystem truth.
    pub fn list_directory_detailed(&self, path: &str, show_hidden: bool) -> Vec<String> {
        let Some(target) = self.find_directory_by_parts(&split_path(path)) else {
            return vec!["Directory not found".to_string()];
        };

        let mut contents = Vec::new();
        for dir in &target.subdirectories {
            if show_hidden || !dir.name.starts_with('.') {
                contents.push(format!(
                    "drwxr-xr-x  2 user user     4096 Jan 15 01:47 {}",
                    dir.name
                ));
            }
        }
        for file in &target.files {
            if show_hidden || !file.hidden {
                let permissions = file.permissions.as_deref().unwrap_or("rw-r--r--");
                contents.push(format!(
                    "-{}  1 user user {:>8} Jan 15 01:47 {}",
                    permissions,
                    file.content.len(),
                    file.name
                ));
            }
        }

        if contents.is_empty() {
            vec!["Empty directory".to_string()]
        } else {
            contents
        }
    }

    /// Depth-first walk over every file, invoking `visit` with the file's
    /// absolute path. Used by the recursive grep/find handlers.
    pub fn walk_files<'a>(&'a self, base: &str, visit: &mut dyn FnMut(String, &'a VirtualFile)) {
        for file in &self.files {
            let full_path = if base == "/" {
                format!("/{}", file.name)
            } else {
                format!("{}/{}", base, file.name)
            };
            visit(full_path, file);
        }
        for dir in &self.subdirectories {
            let sub_path = if base == "/" {
                format!("/{}", dir.name)
            } else {
                format!("{}/{}", base, dir.name)
            };
            dir.walk_files(&sub_path, visit);
        }
    }
}

/// Absolute paths pass through untouched; relative paths are joined onto the
/// current directory. Only the first `//` run is collapsed, which matches
/// the path contract missions are written against.
pub fn resolve_path(current_dir: &str, target_path: &str) -> String {
    if target_path.starts_with('/') {
        target_path.to_string()
    } else {
        format!("{}/{}", current_dir, target_path).replacen("//", "/", 1)
    }
}

/// Drops empty and "." segments. No ".." traversal: mission content never
/// needs parent navigation, so a literal ".." simply fails to match.
pub fn split_path(path: &str) -> Vec<&str> {
    path.split('/')
        .filter(|part| !part.is_empty() && *part != ".")
        .collect()
}

pub fn filter_by_prefix(items: &[String], prefix: &str) -> Vec<String> {
    let prefix = prefix.to_lowercase();
    items
        .iter()
        .filter(|item| item.to_lowercase().starts_with(&prefix))
        .cloned()
        .collect()
}

pub fn directories_only(items: &[String]) -> Vec<String> {
    items
        .iter()
        .filter(|item| item.ends_with('/'))
        .map(|item| item[..item.len() - 1].to_string())
        .collect()
}
