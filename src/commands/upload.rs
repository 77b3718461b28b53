use super::CommandError;
use crate::cloudinary::{MediaUploader, UploadRequest};
use std::path::{Component, Path, PathBuf};
use tracing::{error, info};
use walkdir::WalkDir;

pub const DEFAULT_PATTERN: &str = "images/**/*.{jpg,jpeg,png,JPG,JPEG,PNG,webp}";

/// Local directory whose subpath becomes the public id.
const IMAGES_SEGMENT: &str = "images";

#[derive(Debug, Clone)]
pub struct UploadOptions {
    pub pattern: String,
    pub dry_run: bool,
}

impl Default for UploadOptions {
    fn default() -> Self {
        Self {
            pattern: DEFAULT_PATTERN.to_string(),
            dry_run: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadReport {
    pub found: usize,
    pub uploaded: usize,
    pub failed: usize,
}

/// Glob over `/`-separated relative paths: `**` spans any number of
/// directories, `*` and `?` stay within one segment, `{a,b}` alternates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePattern {
    alternatives: Vec<Vec<String>>,
}

impl FilePattern {
    pub fn parse(pattern: &str) -> Result<Self, CommandError> {
        let alternatives = expand_braces(pattern)
            .map_err(|reason| CommandError::InvalidPattern {
                pattern: pattern.to_string(),
                reason,
            })?
            .into_iter()
            .map(|p| {
                p.split('/')
                    .filter(|s| !s.is_empty() && *s != ".")
                    .map(str::to_string)
                    .collect()
            })
            .collect();

        Ok(Self { alternatives })
    }

    pub fn matches(&self, relative_path: &str) -> bool {
        let segments: Vec<&str> = relative_path.split('/').filter(|s| !s.is_empty()).collect();
        self.alternatives
            .iter()
            .any(|pattern| match_segments(pattern, &segments))
    }

    /// Longest wildcard-free directory prefix of each alternative; only these
    /// need walking.
    fn base_dirs(&self) -> Vec<PathBuf> {
        let mut dirs: Vec<PathBuf> = self
            .alternatives
            .iter()
            .map(|pattern| {
                let literal = pattern
                    .iter()
                    .take(pattern.len().saturating_sub(1))
                    .take_while(|s| !s.contains(['*', '?']));
                literal.collect()
            })
            .collect();
        dirs.sort();
        dirs.dedup();
        dirs
    }

    /// Files under `root` matching the pattern, as sorted paths relative to
    /// `root`.
    pub fn discover(&self, root: &Path) -> Vec<PathBuf> {
        let mut found = Vec::new();

        for base in self.base_dirs() {
            for entry in WalkDir::new(root.join(&base))
                .into_iter()
                .filter_map(Result::ok)
                .filter(|e| e.file_type().is_file())
            {
                let Ok(relative) = entry.path().strip_prefix(root) else {
                    continue;
                };
                if self.matches(&to_slash(relative)) {
                    found.push(relative.to_path_buf());
                }
            }
        }

        found.sort();
        found.dedup();
        found
    }
}

fn to_slash(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(s) => s.to_str(),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

fn expand_braces(pattern: &str) -> Result<Vec<String>, String> {
    let Some(open) = pattern.find('{') else {
        if pattern.contains('}') {
            return Err("unmatched '}'".to_string());
        }
        return Ok(vec![pattern.to_string()]);
    };

    let mut depth = 0;
    let mut close = None;
    let mut splits = Vec::new();
    for (i, c) in pattern[open..].char_indices() {
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    close = Some(open + i);
                    break;
                }
            }
            ',' if depth == 1 => splits.push(open + i),
            _ => {}
        }
    }
    let close = close.ok_or_else(|| "unmatched '{'".to_string())?;

    let prefix = &pattern[..open];
    let suffix = &pattern[close + 1..];
    let mut bounds = vec![open];
    bounds.extend(splits);
    bounds.push(close);

    let mut expanded = Vec::new();
    for pair in bounds.windows(2) {
        let option = &pattern[pair[0] + 1..pair[1]];
        expanded.extend(expand_braces(&format!("{}{}{}", prefix, option, suffix))?);
    }
    Ok(expanded)
}

fn match_segments(pattern: &[String], path: &[&str]) -> bool {
    match pattern.split_first() {
        None => path.is_empty(),
        Some((head, rest)) if head == "**" => {
            (0..=path.len()).any(|skip| match_segments(rest, &path[skip..]))
        }
        Some((head, rest)) => match path.split_first() {
            Some((segment, path_rest)) => {
                wildcard_match(head, segment) && match_segments(rest, path_rest)
            }
            None => false,
        },
    }
}

fn wildcard_match(pattern: &str, text: &str) -> bool {
    let p: Vec<char> = pattern.chars().collect();
    let t: Vec<char> = text.chars().collect();
    let (mut pi, mut ti) = (0, 0);
    let mut backtrack: Option<(usize, usize)> = None;

    while ti < t.len() {
        if pi < p.len() && (p[pi] == '?' || p[pi] == t[ti]) {
            pi += 1;
            ti += 1;
        } else if pi < p.len() && p[pi] == '*' {
            backtrack = Some((pi, ti));
            pi += 1;
        } else if let Some((star, matched)) = backtrack {
            pi = star + 1;
            ti = matched + 1;
            backtrack = Some((star, matched + 1));
        } else {
            return false;
        }
    }

    p[pi..].iter().all(|&c| c == '*')
}

/// Public id for a local file: the path below the first `images` directory,
/// without extension. Paths outside any `images` directory keep their full
/// relative path.
pub fn public_id_for(relative_path: &Path) -> String {
    let segments: Vec<String> = relative_path
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();

    let start = segments
        .iter()
        .position(|s| s == IMAGES_SEGMENT)
        .map_or(0, |i| i + 1);
    let mut parts: Vec<String> = segments[start..].to_vec();

    if let Some(last) = parts.last_mut()
        && let Some(stem) = Path::new(last.as_str()).file_stem().and_then(|s| s.to_str())
    {
        *last = stem.to_string();
    }
    parts.join("/")
}

/// Uploads every file under `root` matching the pattern into `folder`. Failed
/// files are logged and counted; the run continues.
pub async fn run_upload(
    uploader: &dyn MediaUploader,
    folder: &str,
    root: &Path,
    options: &UploadOptions,
) -> Result<UploadReport, CommandError> {
    let pattern = FilePattern::parse(&options.pattern)?;
    let files = pattern.discover(root);

    let mut report = UploadReport {
        found: files.len(),
        ..UploadReport::default()
    };
    if files.is_empty() {
        info!("No files found for pattern: {}", options.pattern);
        return Ok(report);
    }

    info!(
        "Found {} files to upload (pattern: {})",
        files.len(),
        options.pattern
    );
    if options.dry_run {
        for file in &files {
            info!("[dry-run] would upload {}", file.display());
        }
        return Ok(report);
    }

    info!("Starting upload to {} folder: {}", uploader.name(), folder);
    for file in files {
        let request = UploadRequest {
            public_id: public_id_for(&file),
            file: root.join(&file),
            folder: folder.to_string(),
            overwrite: false,
        };

        match uploader.upload(&request).await {
            Ok(response) => {
                info!("Uploaded: {} -> {}", file.display(), response.secure_url);
                report.uploaded += 1;
            }
            Err(e) => {
                error!("Upload failed for {}: {}", file.display(), e);
                report.failed += 1;
            }
        }
    }

    info!(
        "Upload run finished: {} uploaded, {} failed. Run `portfolio sync` to refresh the data file",
        report.uploaded, report.failed
    );
    Ok(report)
}
