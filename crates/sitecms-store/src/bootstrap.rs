//! First-run seeding of site artifacts from their example templates.

use {
    crate::advisory::{Advisory, AdvisoryOperation},
    sitecms_common::{SeedTarget, StoreConfig},
    std::fs,
};

#[derive(Debug, Clone, Default)]
pub struct BootstrapReport {
    pub outcomes: Vec<Advisory>,
}

impl BootstrapReport {
    pub fn seeded(&self) -> impl Iterator<Item = &Advisory> {
        self.outcomes.iter().filter(|a| a.is_completed())
    }

    pub fn failures(&self) -> impl Iterator<Item = &Advisory> {
        self.outcomes.iter().filter(|a| a.is_failed())
    }
}

/// Seed every missing artifact whose template exists.
///
/// Each target is handled on its own: a failure is logged and the remaining
/// targets still run.
pub fn bootstrap(config: &StoreConfig) -> BootstrapReport {
    let outcomes = config
        .seed_targets()
        .iter()
        .map(|target| seed(target).logged())
        .collect();

    BootstrapReport { outcomes }
}

fn seed(target: &SeedTarget) -> Advisory {
    let op = AdvisoryOperation::Seed;

    if target.target.exists() {
        return Advisory::skipped(op, target.label, target.target.clone(), "already present");
    }
    if !target.template.is_file() {
        return Advisory::skipped(op, target.label, target.target.clone(), "no template");
    }

    if let Some(parent) = target.target.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            return Advisory::failed(op, target.label, target.target.clone(), e);
        }
    }

    match fs::copy(&target.template, &target.target) {
        Ok(_) => Advisory::completed(op, target.label, target.target.clone()),
        Err(e) => Advisory::failed(op, target.label, target.target.clone(), e),
    }
}
