//! Text of the individual Dockerfile blocks
//!
//! Each function returns one block exactly as it appears in the managed
//! Dockerfile, including its leading blank line where it has one. The
//! output is re-parsed downstream, so formatting here is part of the contract.

use super::hooks::{AptRepo, CopySpec};
use super::tables::{KEYSERVER, MANAGED_MARKER, REPOSITORY_TOOLS, USER_ID, USER_NAME};
use chrono::{DateTime, SecondsFormat, Utc};

const CONTINUATION: &str = " \\\n";
const PACKAGE_INDENT: &str = "      ";

pub fn header(tool_name: &str, tool_version: &str, generated_at: &DateTime<Utc>) -> String {
    format!(
        "# Generated by {tool} {version} at {at}\n\
         # To stop {tool} generating this file and start editing it yourself,\n\
         # rename it to \"Dockerfile\".\n",
        tool = tool_name,
        version = tool_version,
        at = generated_at.to_rfc3339_opts(SecondsFormat::Millis, true),
    )
}

pub fn from(base_name: &str, base_version: &str) -> String {
    if base_version.is_empty() {
        format!("FROM {}\n", base_name)
    } else {
        format!("FROM {}:{}\n", base_name, base_version)
    }
}

/// Escapes the first double quote only. Values are expected to be
/// quote-free; this keeps the long-standing wire format.
pub fn escape_env_value(value: &str) -> String {
    value.replacen('"', "\\\"", 1)
}

pub fn env(vars: &[(String, String)]) -> String {
    let pairs: Vec<String> = vars
        .iter()
        .map(|(key, value)| format!("{}=\"{}\"", key, escape_env_value(value)))
        .collect();

    format!("\nENV {}\n", pairs.join(&format!("{}    ", CONTINUATION)))
}

fn apt_get_install(packages: &[&str]) -> String {
    let mut block = String::from("\nRUN apt-get update");
    block.push_str(CONTINUATION);
    block.push_str(" && DEBIAN_FRONTEND=noninteractive apt-get install -y");
    for package in packages {
        block.push_str(CONTINUATION);
        block.push_str(PACKAGE_INDENT);
        block.push_str(package);
    }
    block
}

/// Installs the tooling `apt-add-repository` depends on
pub fn repository_tools() -> String {
    let mut block = apt_get_install(REPOSITORY_TOOLS);
    block.push('\n');
    block
}

pub fn repository(repo: &AptRepo) -> String {
    let mut block = format!("\nRUN apt-add-repository \"{}\"", repo.repository);
    if let Some(key_id) = &repo.key_id {
        block.push_str(CONTINUATION);
        block.push_str(&format!(
            " && apt-key adv --keyserver {} --recv-keys {}",
            KEYSERVER, key_id
        ));
    }
    block.push('\n');
    block
}

/// Single layer: index update, install, then cleanup so nothing cached
/// survives into the image
pub fn apt_packages(packages: &[String]) -> String {
    let packages: Vec<&str> = packages.iter().map(String::as_str).collect();
    let mut block = apt_get_install(&packages);
    for step in [
        " && apt-get autoremove -y",
        " && apt-get clean",
        " && rm -rf /var/lib/apt/lists/*",
    ] {
        block.push_str(CONTINUATION);
        block.push_str(step);
    }
    block.push('\n');
    block
}

pub fn drop_privileges() -> String {
    format!(
        "\nRUN useradd --create-home --uid {id} -s /bin/bash {user}\n\
         USER {user}\n\
         WORKDIR /home/{user}\n",
        id = USER_ID,
        user = USER_NAME,
    )
}

fn copy_line(spec: &CopySpec) -> String {
    format!("COPY {} {}\n", spec.from, spec.to)
}

/// Managed install region: marker, staged files, install command.
/// The marker is only written when there is a command to mark.
pub fn install(files: &[CopySpec], command: Option<&str>) -> String {
    if files.is_empty() && command.is_none() {
        return String::new();
    }

    let mut block = String::from("\n");
    if command.is_some() {
        block.push_str(&format!("# {}\n", MANAGED_MARKER));
    }
    for spec in files {
        block.push_str(&copy_line(spec));
    }
    if let Some(command) = command {
        block.push_str(&format!("RUN {}\n", command));
    }
    block
}

pub fn project_files(files: &[CopySpec]) -> String {
    let mut block = String::from("\n");
    for spec in files {
        block.push_str(&copy_line(spec));
    }
    block
}

pub fn cmd(command: &str) -> String {
    format!("\nCMD {}\n", command)
}
