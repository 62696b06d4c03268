//! Diff display

use colored::Colorize;
use declarative::Diff;

/// Display a diff in a user-friendly format
pub fn display_diff(diff: &Diff) {
    let summary = diff.summary();

    if !summary.has_changes() {
        println!();
        println!("  {} No changes", "✓".green());
        return;
    }

    println!();
    println!(
        "┌─ {} ─────────────────────────────────────────┐",
        "Configuration Diff".bold()
    );
    println!("│");

    let collections = [
        ("Remotes", names(&diff.added.remotes, |r| r.name.clone())),
        ("Components", resource_names(&diff.added.components)),
        ("Services", resource_names(&diff.added.services)),
        ("Processes", names(&diff.added.processes, |p| p.id.clone())),
        ("Packages", names(&diff.added.packages, |p| p.name.clone())),
        ("Modules", names(&diff.added.modules, |m| m.name.clone())),
    ];
    let modified = [
        names(&diff.modified.remotes, |r| r.name.clone()),
        resource_names(&diff.modified.components),
        resource_names(&diff.modified.services),
        names(&diff.modified.processes, |p| p.id.clone()),
        names(&diff.modified.packages, |p| p.name.clone()),
        names(&diff.modified.modules, |m| m.name.clone()),
    ];
    let removed = [
        names(&diff.removed.remotes, |r| r.name.clone()),
        resource_names(&diff.removed.components),
        resource_names(&diff.removed.services),
        names(&diff.removed.processes, |p| p.id.clone()),
        names(&diff.removed.packages, |p| p.name.clone()),
        names(&diff.removed.modules, |m| m.name.clone()),
    ];

    for (((title, added), modified), removed) in collections.iter().zip(&modified).zip(&removed) {
        if added.is_empty() && modified.is_empty() && removed.is_empty() {
            continue;
        }
        println!("│ {}", title.bold());
        for name in added {
            println!("│   {} {}", "+".green(), name);
        }
        for name in modified {
            println!("│   {} {}", "~".yellow(), name);
        }
        for name in removed {
            println!("│   {} {}", "-".red(), name);
        }
        println!("│");
    }

    let flag = |equal: bool| {
        if equal {
            "unchanged".dimmed()
        } else {
            "changed".yellow()
        }
    };
    println!("│ {:<10} {}", "Network".bold(), flag(summary.network_equal));
    println!("│ {:<10} {}", "Logging".bold(), flag(summary.log_equal));
    if !summary.revision.is_empty() {
        println!("│ {:<10} {}", "Revision".bold(), summary.revision);
    }

    println!("├─────────────────────────────────────────────────────┤");
    println!(
        "│ Summary: {} changes ({} unmodified resources)",
        summary.total().to_string().bold(),
        summary.unmodified.to_string().dimmed()
    );
    println!("└─────────────────────────────────────────────────────┘");
}

fn names<T>(items: &[T], name: impl Fn(&T) -> String) -> Vec<String> {
    items.iter().map(name).collect()
}

fn resource_names(items: &[resource::Config]) -> Vec<String> {
    names(items, |c| c.resource_name().to_string())
}
