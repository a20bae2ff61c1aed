//! List command implementation

use typographe_core::{builtin, builtin_ids, registry, Convergence, PassCategory};

use crate::commands::ListCommands;
use crate::error::CliResult;

/// Execute a list subcommand
pub fn execute(subcommand: &ListCommands) -> CliResult<i32> {
    match subcommand {
        ListCommands::Profiles => list_profiles()?,
        ListCommands::Passes => list_passes(),
    }
    Ok(0)
}

fn list_profiles() -> CliResult<()> {
    println!("Embedded profiles:");
    for id in builtin_ids() {
        let profile = builtin(id)?;
        println!("  {:<8} {}", profile.id(), profile.label());
    }
    Ok(())
}

fn list_passes() {
    println!("Passes in run order:");
    for spec in registry() {
        println!(
            "  {:<12} rank {:<3} {:<12} {}",
            spec.id.id(),
            spec.rank,
            category_name(spec.category),
            convergence_name(spec.convergence),
        );
    }
}

fn category_name(category: PassCategory) -> &'static str {
    match category {
        PassCategory::Punctuation => "punctuation",
        PassCategory::Numeric => "numeric",
        PassCategory::Notation => "notation",
    }
}

fn convergence_name(convergence: Convergence) -> &'static str {
    match convergence {
        Convergence::Single => "single",
        Convergence::IterateToFixpoint => "iterate-to-fixpoint",
    }
}
