use super::models::{AppEvent, EventBus};
use std::sync::Arc;
use colored::Colorize;

impl EventBus {
    pub fn new(silent_mode: bool) -> Arc<Self> {
        Arc::new(Self { silent_mode })
    }

    pub fn is_silent(&self) -> bool {
        self.silent_mode
    }

    pub fn emit(&self, event: AppEvent) {
        // Diagnostics always reach the log, console lines respect silent mode
        match &event {
            AppEvent::UploadFailed { server, path, error } => {
                tracing::error!(server = %server, path = %path, "Upload failed: {}", error);
            }
            AppEvent::ServerAborted { server, error } => {
                tracing::error!(server = %server, "Directory creation failed, skipping uploads: {}", error);
            }
            AppEvent::ConfigError { error } => {
                tracing::error!("Configuration error: {}", error);
            }
            AppEvent::Error { context, error } => {
                tracing::error!("{}: {}", context, error);
            }
            _ => {}
        }

        if self.silent_mode {
            return;
        }

        match event {
            // Application lifecycle
            AppEvent::Starting => {
                println!("\n{}", "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━".bright_black());
                println!("  {}", "panelsync - Panel File Sync".white().bold());
                println!("  {} {}", "Version".dimmed(), env!("CARGO_PKG_VERSION").cyan());
                println!("{}\n", "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━".bright_black());
            }
            AppEvent::Finished { succeeded, failed, failures, duration } => {
                let rule = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";
                let rule = if failed == 0 { rule.green() } else { rule.red() };
                println!("\n{}", rule);
                println!("  {} {}", "Uploaded".white(), succeeded.to_string().green());
                println!("  {} {}", "Failed  ".white(), failed.to_string().red());
                for line in &failures {
                    println!("    {} {}", "-".red(), line);
                }
                println!("  {} {:.2}s", "Elapsed ".white(), duration.as_secs_f64());
                println!("{}\n", rule);
            }

            // Configuration
            AppEvent::ConfigLoading { path } => {
                println!("  {} {}", "Loading config".dimmed(), path.cyan());
            }
            AppEvent::ConfigLoaded { panel_url, root } => {
                println!("  {} {} ← {}", "✓".green(), panel_url.cyan(), root.dimmed());
            }
            AppEvent::ConfigCreated { path } => {
                tracing::warn!("Configuration file not found");
                tracing::info!("Created default configuration at: {}", path);
            }
            AppEvent::ConfigMigrated { added_fields } => {
                if !added_fields.is_empty() {
                    println!("  {} Config updated: added {}",
                        "↻".blue(),
                        added_fields.join(", ").dimmed()
                    );
                }
            }
            AppEvent::ConfigError { .. } => {}

            // Scanning
            AppEvent::ScanStarted { root } => {
                println!("  {} Scanning {}...", "→".dimmed(), root.cyan());
            }
            AppEvent::ScanCompleted { files, directories, duration } => {
                println!(
                    "  {} {} file(s), {} folder(s) in {:.2}s",
                    "✓".green(),
                    files.to_string().cyan(),
                    directories.to_string().cyan(),
                    duration.as_secs_f64()
                );
            }

            // Server selection
            AppEvent::ServersFetched { total, pages } => {
                println!("  {} {} server(s) on panel ({} page(s))", "→".dimmed(), total, pages);
            }
            AppEvent::ServersSelected { names } => {
                println!("  {} {} server(s) selected: {}",
                    "✓".green(),
                    names.len().to_string().cyan(),
                    names.join(", ").dimmed()
                );
            }
            AppEvent::ServerSkipped { .. } => {
                // Silent - reduce verbosity
            }

            // Per-server sync
            AppEvent::ServerSyncStarted { server, files } => {
                println!("\n  {} {} ({} files)", "▶".blue(), server.white().bold(), files);
            }
            AppEvent::DirectoryCreated { path, .. } => {
                println!("    {} {}/", "+".green(), path);
            }
            AppEvent::DirectoryExists { .. } => {
                // Silent
            }
            AppEvent::DirectoriesEnsured { created, existing, .. } => {
                println!("    {} folders: {} created, {} existing", "✓".green(), created, existing);
            }
            AppEvent::FileUploaded { path, .. } => {
                println!("    {} {}", "↑".green(), path.dimmed());
            }
            AppEvent::UploadFailed { path, error, .. } => {
                println!("    {} {} {}", "✗".red(), path, error.dimmed());
            }
            AppEvent::ServerAborted { server, error } => {
                println!("    {} {} aborted: {}", "✗".red(), server, error.dimmed());
            }
            AppEvent::ServerSyncCompleted { server, succeeded, failed } => {
                if failed.is_empty() {
                    println!("  {} {}: {} uploaded", "✓".green(), server.cyan(), succeeded);
                } else {
                    // Paths are listed once in the final summary
                    println!(
                        "  {} {}: {} uploaded, {} failed",
                        "⚠".yellow(),
                        server.cyan(),
                        succeeded,
                        failed.len().to_string().red()
                    );
                }
            }

            AppEvent::Error { .. } => {}
        }
    }
}
