//! Core materialization engine.
//!
//! Renders the template tree into the destination project directory:
//! per-file copy-or-substitute, recursive subtree materialization, and
//! variant selection driven by the typed configuration. The engine is the
//! sole writer under the destination root and never mutates the template
//! source, so two runs over the same inputs produce identical trees.

use globset::GlobSet;
use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::{Placeholders, ProjectConfig};
use crate::constants::{
    AGENT_DIR, BACKEND_DIR, BACKEND_SKELETON_DIR, CI_DIR, DEPLOYMENT_DIR, DOCS_DIR,
    FRONTEND_DIR, FRONTEND_SKELETON_DIR, MEMORIES_DIR, RULES_COMMON_DIR, RULES_DIR,
    RULES_PROJECT_TEMPLATE_DIR,
};
use crate::error::{Error, Result};
use crate::ignore::parse_ignore_file;
use crate::prompt::Prompter;
use crate::template::{classify, substitute};
use crate::ui;

/// The blocking safety gate in front of the engine.
///
/// An existing destination is never silently merged into: the caller must
/// confirm the overwrite (or pass `force`), after which the prior contents
/// are fully removed. Declining aborts before any write happens.
pub fn ensure_project_dir(
    prompt: &dyn Prompter,
    project_dir: &Path,
    force: bool,
) -> Result<()> {
    if project_dir.exists() {
        let overwrite = if force {
            true
        } else {
            ui::print_warning(&format!(
                "Project directory '{}' already exists",
                project_dir.display()
            ));
            prompt.confirm("Overwrite it?", false)?
        };
        if !overwrite {
            return Err(Error::ProjectDirectoryExistsError {
                project_dir: project_dir.display().to_string(),
            });
        }
        fs::remove_dir_all(project_dir).map_err(|e| Error::write(project_dir, e))?;
    }
    fs::create_dir_all(project_dir).map_err(|e| Error::write(project_dir, e))
}

/// Renders one template tree into one project directory.
pub struct Materializer<'a> {
    config: &'a ProjectConfig,
    template_root: &'a Path,
    project_dir: &'a Path,
    vars: Placeholders,
    ignored: GlobSet,
}

impl<'a> Materializer<'a> {
    pub fn new(
        config: &'a ProjectConfig,
        template_root: &'a Path,
        project_dir: &'a Path,
    ) -> Result<Self> {
        if !template_root.is_dir() {
            return Err(Error::TemplateError(format!(
                "template root '{}' does not exist",
                template_root.display()
            )));
        }
        let ignored = parse_ignore_file(template_root)?;
        Ok(Self {
            config,
            template_root,
            project_dir,
            vars: config.placeholders(),
            ignored,
        })
    }

    /// Runs the whole materialization, step by step. Any single I/O
    /// failure is fatal to the run; already-written files stay in place.
    pub fn run(&self) -> Result<()> {
        fs::create_dir_all(self.project_dir)
            .map_err(|e| Error::write(self.project_dir, e))?;

        self.materialize_root_files()?;

        if self.materialize_subtree(AGENT_DIR, AGENT_DIR)? {
            ui::print_success(&format!("{}/", AGENT_DIR));
        }

        self.materialize_rules()?;

        if self.materialize_subtree(DOCS_DIR, DOCS_DIR)? {
            ui::print_success(&format!("{}/", DOCS_DIR));
        }

        self.materialize_memories()?;
        self.materialize_skeletons()?;
        self.materialize_deployments()?;

        if self.materialize_subtree(CI_DIR, CI_DIR)? {
            ui::print_success(&format!("{}/", CI_DIR));
        }

        Ok(())
    }

    /// Step 2: fixed root-level files of the template tree.
    fn materialize_root_files(&self) -> Result<()> {
        let entries = fs::read_dir(self.template_root)
            .map_err(|e| Error::read(self.template_root, e))?;

        for entry in entries {
            let entry = entry.map_err(|e| Error::read(self.template_root, e))?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let relative = path
                .strip_prefix(self.template_root)
                .map_err(|e| Error::TemplateError(e.to_string()))?;
            if self.ignored.is_match(relative) {
                debug!("Skipping ignored file '{}'", relative.display());
                continue;
            }
            let (target, is_template) = classify(relative);
            self.materialize_file(&path, &self.project_dir.join(&target), is_template)?;
            ui::print_success(&target);
        }
        Ok(())
    }

    /// Step 4: shared rules verbatim plus the project-specific rules
    /// subtree renamed to the project identifier.
    fn materialize_rules(&self) -> Result<()> {
        let common = format!("{}/{}", RULES_DIR, RULES_COMMON_DIR);
        if self.copy_subtree_verbatim(&common, &common)? {
            ui::print_success(&format!("{}/", common));
        }

        let project_rules =
            format!("{}/{}", RULES_DIR, self.config.identity.name);
        let source = format!("{}/{}", RULES_DIR, RULES_PROJECT_TEMPLATE_DIR);
        if self.materialize_subtree(&source, &project_rules)? {
            ui::print_success(&format!("{}/", project_rules));
        }
        Ok(())
    }

    /// Step 6: exactly one memory tier's file set.
    fn materialize_memories(&self) -> Result<()> {
        let tier = self.config.memory_tier.value();
        let source = format!("{}/{}", MEMORIES_DIR, tier);
        if self.materialize_subtree(&source, MEMORIES_DIR)? {
            ui::print_success(&format!("{}/ ({})", MEMORIES_DIR, tier));
        }
        Ok(())
    }

    /// Step 7: backend and frontend skeletons, one variant each.
    fn materialize_skeletons(&self) -> Result<()> {
        let backend = self.config.stack.backend.value();
        let source = format!("{}/{}", BACKEND_SKELETON_DIR, backend);
        if self.materialize_subtree(&source, BACKEND_DIR)? {
            ui::print_success(&format!("{}/ ({})", BACKEND_DIR, backend));
        }

        let frontend = self.config.stack.frontend.value();
        let source = format!("{}/{}", FRONTEND_SKELETON_DIR, frontend);
        if self.materialize_subtree(&source, FRONTEND_DIR)? {
            ui::print_success(&format!("{}/ ({})", FRONTEND_DIR, frontend));
        }
        Ok(())
    }

    /// Step 8: zero, one or two deployment subtrees. When both hosting
    /// sides resolve to the same variant it is materialized once.
    fn materialize_deployments(&self) -> Result<()> {
        let mut variants: Vec<&str> = Vec::new();
        if let Some(dir) = self.config.hosting.frontend.deploy_dir() {
            variants.push(dir);
        }
        if let Some(dir) = self.config.hosting.backend.deploy_dir() {
            if !variants.contains(&dir) {
                variants.push(dir);
            }
        }

        for variant in variants {
            let rel = format!("{}/{}", DEPLOYMENT_DIR, variant);
            if self.materialize_subtree(&rel, &rel)? {
                ui::print_success(&format!("{}/", rel));
            }
        }
        Ok(())
    }

    /// Recursively materializes one subtree, classifying each file and
    /// de-marking destination names. Returns false when the template tree
    /// does not carry the subtree at all.
    pub fn materialize_subtree(&self, rel_source: &str, rel_target: &str) -> Result<bool> {
        let source_dir = self.template_root.join(rel_source);
        if !source_dir.is_dir() {
            warn!("template has no '{}' subtree, skipping", rel_source);
            return Ok(false);
        }
        let target_dir = self.project_dir.join(rel_target);

        for entry in WalkDir::new(&source_dir) {
            let entry = entry.map_err(|e| Error::TemplateError(e.to_string()))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            if self.is_ignored(path) {
                continue;
            }
            let relative = path
                .strip_prefix(&source_dir)
                .map_err(|e| Error::TemplateError(e.to_string()))?;
            let (target, is_template) = classify(relative);
            self.materialize_file(path, &target_dir.join(target), is_template)?;
        }
        Ok(true)
    }

    /// Byte-for-byte copy of a subtree, no classification or de-marking.
    pub fn copy_subtree_verbatim(&self, rel_source: &str, rel_target: &str) -> Result<bool> {
        let source_dir = self.template_root.join(rel_source);
        if !source_dir.is_dir() {
            warn!("template has no '{}' subtree, skipping", rel_source);
            return Ok(false);
        }
        let target_dir = self.project_dir.join(rel_target);

        for entry in WalkDir::new(&source_dir) {
            let entry = entry.map_err(|e| Error::TemplateError(e.to_string()))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            if self.is_ignored(path) {
                continue;
            }
            let relative = path
                .strip_prefix(&source_dir)
                .map_err(|e| Error::TemplateError(e.to_string()))?;
            copy_file(path, &target_dir.join(relative))?;
        }
        Ok(true)
    }

    /// Materializes a single file: substitute-and-write for templates,
    /// byte-identical copy otherwise. Missing destination parents are
    /// created first.
    pub fn materialize_file(
        &self,
        source: &Path,
        target: &Path,
        is_template: bool,
    ) -> Result<()> {
        if is_template {
            debug!("Writing file: {}", target.display());
            let content = read_file(source)?;
            write_file(target, &substitute(&content, &self.vars))
        } else {
            debug!("Copying file: {}", target.display());
            copy_file(source, target)
        }
    }

    /// Ignore patterns match against paths relative to the template root.
    fn is_ignored(&self, path: &Path) -> bool {
        let relative = path.strip_prefix(self.template_root).unwrap_or(path);
        if self.ignored.is_match(relative) {
            debug!("Skipping ignored file '{}'", relative.display());
            return true;
        }
        false
    }
}

fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| Error::read(path, e))
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::write(parent, e))?;
    }
    fs::write(path, content).map_err(|e| Error::write(path, e))
}

fn copy_file(source: &Path, dest: &Path) -> Result<()> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::write(parent, e))?;
    }
    fs::copy(source, dest).map(|_| ()).map_err(|e| Error::write(dest, e))
}

/// Destination project directory: `<output_root>/<project-name>`.
pub fn project_dir(output_root: &Path, project_name: &str) -> PathBuf {
    output_root.join(project_name)
}
