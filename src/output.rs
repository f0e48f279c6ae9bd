//! Output formatting for CLI display.
//!
//! Provides the [`PrettyPrint`] trait for human-readable output
//! as an alternative to JSON serialization.

use crate::User;

/// Trait for human-readable key-value output.
///
/// Implemented by entity types to provide formatted output
/// suitable for terminal display when `--json` is not specified.
pub trait PrettyPrint {
    /// Returns a formatted string for terminal display.
    fn pretty_print(&self) -> String;
}

impl PrettyPrint for User {
    fn pretty_print(&self) -> String {
        let header = format!("User #{}: {}", self.id, self.username);
        let divider = "─".repeat(header.chars().count().max(30));

        let mut lines = vec![
            header,
            divider,
            format!("Name:           {}", self.display_name()),
            format!("Email:          {}", self.email),
            format!("UUID:           {}", self.uuid),
        ];

        if !self.external_id.is_empty() {
            lines.push(format!("External ID:    {}", self.external_id));
        }

        lines.push(format!("Language:       {}", self.language));
        lines.push(format!(
            "Admin:          {}",
            if self.root_admin { "yes" } else { "no" }
        ));
        lines.push(format!(
            "2FA:            {}",
            if self.two_fa { "enabled" } else { "disabled" }
        ));

        match self.created_at_parsed() {
            Some(created) => lines.push(format!(
                "Created:        {}",
                created.format("%Y-%m-%d %H:%M:%S %:z")
            )),
            None => lines.push(format!("Created:        {}", self.created_at)),
        }

        lines.join("\n")
    }
}
