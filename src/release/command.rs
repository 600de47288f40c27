use std::fmt;

use crate::config::Secret;

/// Format string passed to `inspect` to print the image's first repo digest
pub const DIGEST_FORMAT: &str = "{{index .RepoDigests 0}}";

/// Position of a command in the release sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    Login,
    Build,
    Push,
    Inspect,
    Logout,
}

impl Step {
    pub fn name(&self) -> &'static str {
        match self {
            Step::Login => "login",
            Step::Build => "build",
            Step::Push => "push",
            Step::Inspect => "inspect",
            Step::Logout => "logout",
        }
    }
}

/// One invocation of the container toolchain
///
/// Displays as the equivalent shell command line. The stdin payload is never
/// part of the display.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolCommand {
    pub step: Step,
    pub program: String,
    pub args: Vec<String>,
    pub stdin: Option<Secret>,
}

impl fmt::Display for ToolCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Builds the commands of a container CLI such as `docker` or `podman`
#[derive(Debug, Clone)]
pub struct Toolchain {
    program: String,
}

impl Toolchain {
    pub fn new(program: impl Into<String>) -> Self {
        Toolchain {
            program: program.into(),
        }
    }

    fn command(&self, step: Step, args: Vec<String>) -> ToolCommand {
        ToolCommand {
            step,
            program: self.program.clone(),
            args,
            stdin: None,
        }
    }

    /// `login -u <username> --password-stdin [registry]`
    pub fn login(
        &self,
        username: &str,
        password: Option<&Secret>,
        registry: Option<&str>,
    ) -> ToolCommand {
        let mut args = vec![
            "login".to_string(),
            "-u".to_string(),
            username.to_string(),
            "--password-stdin".to_string(),
        ];
        args.extend(registry.map(str::to_string));

        let mut command = self.command(Step::Login, args);
        command.stdin = password.cloned();
        command
    }

    /// `build [-f <dockerfile>] -t <ref>... <context>`
    pub fn build(
        &self,
        dockerfile: Option<&str>,
        image_refs: &[String],
        context: &str,
    ) -> ToolCommand {
        let mut args = vec!["build".to_string()];
        if let Some(dockerfile) = dockerfile {
            args.push("-f".to_string());
            args.push(dockerfile.to_string());
        }
        for image_ref in image_refs {
            args.push("-t".to_string());
            args.push(image_ref.clone());
        }
        args.push(context.to_string());

        self.command(Step::Build, args)
    }

    pub fn push(&self, image_ref: &str) -> ToolCommand {
        self.command(Step::Push, vec!["push".to_string(), image_ref.to_string()])
    }

    /// `inspect --format={{index .RepoDigests 0}} <ref>`
    pub fn inspect(&self, image_ref: &str) -> ToolCommand {
        self.command(
            Step::Inspect,
            vec![
                "inspect".to_string(),
                format!("--format={}", DIGEST_FORMAT),
                image_ref.to_string(),
            ],
        )
    }

    pub fn logout(&self, registry: Option<&str>) -> ToolCommand {
        let mut args = vec!["logout".to_string()];
        args.extend(registry.map(str::to_string));
        self.command(Step::Logout, args)
    }
}
