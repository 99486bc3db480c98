//! Resolves logical resource names (shell pages, icons) to files on disk.
//!
//! Packaging tools place bundled resources differently per platform and build
//! configuration, so every lookup probes an ordered candidate list and falls
//! back to a deterministic guess instead of failing.

use std::path::{Path, PathBuf};

const SHELL_PAGE_DIR: &str = "shell";
const TRAY_ICON_VARIANTS: [&str; 3] = ["icons/tray.png", "icons/32x32.png", "icons/icon.png"];

#[derive(Debug, Clone, Default)]
pub struct LocatorRoots {
    pub resource_dir: Option<PathBuf>,
    pub exe_dir: Option<PathBuf>,
    pub manifest_dir: Option<PathBuf>,
    pub current_dir: Option<PathBuf>,
    pub data_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatedResource {
    pub path: PathBuf,
    pub found: bool,
}

#[derive(Debug, Clone)]
pub struct ResourceLocator {
    roots: LocatorRoots,
    packaged: bool,
}

pub fn relative_variants(logical_name: &str) -> Vec<PathBuf> {
    let name = logical_name.trim().trim_start_matches(['/', '\\']);
    if name == crate::TRAY_ICON_RESOURCE {
        return TRAY_ICON_VARIANTS.iter().map(PathBuf::from).collect();
    }
    if name.ends_with(".html") && !name.contains('/') {
        return vec![Path::new(SHELL_PAGE_DIR).join(name)];
    }
    vec![PathBuf::from(name)]
}

impl ResourceLocator {
    pub fn new(roots: LocatorRoots, packaged: bool) -> Self {
        Self { roots, packaged }
    }

    fn production_roots(&self) -> Vec<PathBuf> {
        let mut roots = Vec::new();
        if let Some(resource_dir) = &self.roots.resource_dir {
            roots.push(resource_dir.clone());
            roots.push(resource_dir.join("_up_"));
        }
        if let Some(exe_dir) = &self.roots.exe_dir {
            roots.push(exe_dir.join("resources"));
            if cfg!(target_os = "macos") {
                roots.push(exe_dir.join("..").join("Resources"));
            }
            roots.push(exe_dir.clone());
        }
        roots
    }

    fn dev_roots(&self) -> Vec<PathBuf> {
        [&self.roots.manifest_dir, &self.roots.current_dir]
            .into_iter()
            .flatten()
            .cloned()
            .collect()
    }

    fn ordered_roots(&self) -> Vec<PathBuf> {
        let (first, second) = if self.packaged {
            (self.production_roots(), self.dev_roots())
        } else {
            (self.dev_roots(), self.production_roots())
        };

        let mut roots = Vec::new();
        for root in first
            .into_iter()
            .chain(second)
            .chain(self.roots.data_dir.iter().cloned())
        {
            if !roots.contains(&root) {
                roots.push(root);
            }
        }
        roots
    }

    pub fn candidates(&self, logical_name: &str) -> Vec<PathBuf> {
        let variants = relative_variants(logical_name);
        self.ordered_roots()
            .iter()
            .flat_map(|root| variants.iter().map(move |variant| root.join(variant)))
            .collect()
    }

    fn best_guess(&self, logical_name: &str) -> PathBuf {
        let preferred_roots = if self.packaged {
            self.production_roots()
        } else {
            self.dev_roots()
        };
        let variants = relative_variants(logical_name);
        let first_variant = variants
            .first()
            .cloned()
            .unwrap_or_else(|| PathBuf::from(logical_name));

        let guess_root = preferred_roots
            .into_iter()
            .next()
            .or_else(|| self.ordered_roots().into_iter().next());
        match guess_root {
            Some(root) => root.join(&first_variant),
            None => first_variant,
        }
    }

    pub fn locate_with<P>(&self, logical_name: &str, exists: P) -> LocatedResource
    where
        P: Fn(&Path) -> bool,
    {
        if let Some(path) = self
            .candidates(logical_name)
            .into_iter()
            .find(|candidate| exists(candidate))
        {
            return LocatedResource { path, found: true };
        }

        LocatedResource {
            path: self.best_guess(logical_name),
            found: false,
        }
    }

    pub fn locate(&self, logical_name: &str) -> LocatedResource {
        self.locate_with(logical_name, Path::is_file)
    }
}
