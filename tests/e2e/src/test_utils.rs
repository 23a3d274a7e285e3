use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Duration;
use tokio::time::sleep;

pub fn create_test_files(dir: &Path, count: usize) -> Result<()> {
    for i in 0..count {
        let filename = format!("file{}.txt", i);
        let content = format!("Test file {} content\n", i);
        let file_path = dir.join(&filename);
        fs::write(&file_path, content)
            .with_context(|| format!("Failed to create test file: {:?}", file_path))?;
    }
    Ok(())
}

pub async fn wait_for_server(url: &str) -> Result<()> {
    let client = reqwest::Client::new();
    let health_url = format!("{}/health", url);

    println!("Waiting for server to be ready...");
    for i in 0..30 {
        match client.get(&health_url).send().await {
            Ok(response) if response.status().is_success() => {
                println!("Server is ready!");
                return Ok(());
            }
            _ => {
                if i < 29 {
                    sleep(Duration::from_secs(1)).await;
                }
            }
        }
    }

    anyhow::bail!("Server did not become ready within 30 seconds");
}

/// Drives the client binary with one name/password pair
pub struct ClientRunner {
    pub binary: PathBuf,
    pub server_url: String,
    pub name: String,
    pub password: String,
}

impl ClientRunner {
    fn command(&self, subcommand: &str) -> Command {
        let mut command = Command::new(&self.binary);
        command
            .arg(subcommand)
            .arg("--server")
            .arg(&self.server_url)
            .arg("--name")
            .arg(&self.name)
            .arg("--password")
            .arg(&self.password);
        command
    }

    /// Run to completion and parse stdout, failing on a non-zero exit
    fn run<T: DeserializeOwned>(&self, mut command: Command, action: &str) -> Result<T> {
        let output = command
            .output()
            .with_context(|| format!("Failed to run client binary: {:?}", self.binary))?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!("{} failed:\nSTDOUT: {}\nSTDERR: {}", action, stdout, stderr);
        }

        serde_json::from_str(&stdout)
            .with_context(|| format!("{} printed unexpected output: {}", action, stdout))
    }

    /// Run expecting a non-zero exit; returns stderr
    fn run_failing(&self, mut command: Command, action: &str) -> Result<String> {
        let output = command
            .output()
            .with_context(|| format!("Failed to run client binary: {:?}", self.binary))?;
        if output.status.success() {
            anyhow::bail!("{} unexpectedly succeeded", action);
        }
        Ok(String::from_utf8_lossy(&output.stderr).into_owned())
    }

    pub fn check(&self) -> Result<tempdrop_common::CheckAuthResponse> {
        self.run(self.command("check"), "Check")
    }

    pub fn upload(&self, dir: &Path) -> Result<tempdrop_common::UploadResponse> {
        let mut command = self.command("upload");
        command.arg("--dir").arg(dir);
        self.run(command, "Upload")
    }

    pub fn list(&self) -> Result<tempdrop_common::ListResponse> {
        self.run(self.command("list"), "List")
    }

    pub fn list_expecting_not_found(&self) -> Result<()> {
        let stderr = self.run_failing(self.command("list"), "List")?;
        if !stderr.contains("404") {
            anyhow::bail!("Expected a 404 from list, got: {}", stderr);
        }
        Ok(())
    }

    pub fn delete(&self) -> Result<tempdrop_common::DeleteResponse> {
        self.run(self.command("delete"), "Delete")
    }
}

pub fn cleanup_test_data(test_data_dir: &Path) -> Result<()> {
    if keep_test_data() {
        println!(
            "\n⚠️  Keeping test data (KEEP_TEST_DATA=true): {:?}",
            test_data_dir
        );
        return Ok(());
    }

    println!("\n🧹 Cleaning up test data: {:?}", test_data_dir);
    if test_data_dir.exists() {
        fs::remove_dir_all(test_data_dir).with_context(|| {
            format!("Failed to remove test data directory: {:?}", test_data_dir)
        })?;
        println!("✅ Test data cleaned up");
    }
    Ok(())
}

pub fn keep_test_data() -> bool {
    std::env::var("KEEP_TEST_DATA").map_or(false, |v| v == "true")
}
