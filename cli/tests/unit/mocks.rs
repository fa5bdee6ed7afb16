//! Shared fakes for unit tests.
//!
//! `FakeHost` keeps a podman connection registry in memory and answers the
//! `limactl` and `podman system connection` commands podbridge issues, so
//! reconcile runs can be replayed against evolving state. `FakeGuest`
//! answers the in-VM probes.

use std::cell::{Cell, RefCell};

use anyhow::{Result, bail};
use podbridge_cli::application::ports::{ExecutionChannel, ProgressReporter};
use podbridge_cli::domain::ConnectionRecord;

// ── Host ──────────────────────────────────────────────────────────────────────

pub struct FakeHost {
    /// Raw `limactl list --json` output.
    pub vm_listing: RefCell<String>,
    pub connections: RefCell<Vec<ConnectionRecord>>,
    /// Connection names whose `add` fails.
    pub failing_adds: RefCell<Vec<String>>,
    pub commands: RefCell<Vec<String>>,
}

impl FakeHost {
    pub fn with_vm(name: &str, port: i64) -> Self {
        Self {
            vm_listing: RefCell::new(format!(
                r#"{{"Name":"{name}","Status":"Running","Dir":"/home/alice/.lima/{name}","Arch":"x86_64","SSHLocalPort":{port},"HostAgentPID":4242,"QemuPID":4343}}"#
            )),
            connections: RefCell::default(),
            failing_adds: RefCell::default(),
            commands: RefCell::default(),
        }
    }

    pub fn without_vms() -> Self {
        let host = Self::with_vm("unused", 0);
        host.vm_listing.borrow_mut().clear();
        host
    }

    /// Simulate the VM coming back on a new forwarded port.
    pub fn restart_vm(&self, name: &str, port: i64) {
        *self.vm_listing.borrow_mut() = Self::with_vm(name, port).vm_listing.into_inner();
    }

    pub fn add_connection(&self, name: &str, uri: &str) {
        self.connections.borrow_mut().push(ConnectionRecord {
            name: name.to_string(),
            identity: "/home/alice/.lima/_config/user".to_string(),
            uri: uri.to_string(),
        });
    }

    pub fn connection_names(&self) -> Vec<String> {
        self.connections
            .borrow()
            .iter()
            .map(|c| c.name.clone())
            .collect()
    }

    pub fn uri_of(&self, name: &str) -> Option<String> {
        self.connections
            .borrow()
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.uri.clone())
    }

    pub fn mutating_commands(&self) -> Vec<String> {
        self.commands
            .borrow()
            .iter()
            .filter(|c| c.contains(" add ") || c.contains(" remove "))
            .cloned()
            .collect()
    }

    fn handle(&self, args: &[&str]) -> Result<String> {
        self.commands.borrow_mut().push(args.join(" "));
        match args {
            ["limactl", "list", "--json"] => Ok(self.vm_listing.borrow().clone()),
            ["podman", "system", "connection", "list", "--format", "json"] => {
                Ok(serde_json::to_string(&*self.connections.borrow())?)
            }
            ["podman", "system", "connection", "add", rest @ ..] => self.add(rest),
            ["podman", "system", "connection", "remove", name] => {
                let mut connections = self.connections.borrow_mut();
                let before = connections.len();
                connections.retain(|c| c.name != *name);
                if connections.len() == before {
                    bail!("Error: connection {name:?} not found");
                }
                Ok(String::new())
            }
            _ => bail!("unexpected host command: {}", args.join(" ")),
        }
    }

    /// `add [--socket-path P] [-d] <name> [--identity I] <uri>`
    fn add(&self, args: &[&str]) -> Result<String> {
        let mut positional = Vec::new();
        let mut identity = String::new();
        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            match *arg {
                "--socket-path" => {
                    iter.next();
                }
                "--identity" => identity = iter.next().map(ToString::to_string).unwrap_or_default(),
                "-d" => {}
                other => positional.push(other.to_string()),
            }
        }
        let [name, uri] = positional.as_slice() else {
            bail!("malformed add: {}", args.join(" "));
        };
        if self.failing_adds.borrow().contains(name) {
            bail!("Error: cannot add {name}");
        }
        if self.connections.borrow().iter().any(|c| &c.name == name) {
            bail!("Error: connection {name:?} already exists");
        }
        self.connections.borrow_mut().push(ConnectionRecord {
            name: name.clone(),
            identity,
            uri: uri.clone(),
        });
        Ok(String::new())
    }
}

impl ExecutionChannel for FakeHost {
    async fn run(&self, args: &[&str]) -> Result<()> {
        self.handle(args).map(drop)
    }
    async fn run_output(&self, args: &[&str]) -> Result<String> {
        self.handle(args)
    }
    async fn run_quiet(&self, args: &[&str]) -> Result<()> {
        self.handle(args).map(drop)
    }
    async fn run_interactive(&self, args: &[&str]) -> Result<()> {
        self.handle(args).map(drop)
    }
}

// ── Guest ─────────────────────────────────────────────────────────────────────

pub struct FakeGuest {
    pub podman_installed: bool,
    /// What `ps -ef | grep ... | wc -l` prints.
    pub process_count: &'static str,
    pub calls: Cell<usize>,
}

impl FakeGuest {
    pub fn running() -> Self {
        Self {
            podman_installed: true,
            process_count: "3",
            calls: Cell::new(0),
        }
    }

    pub fn stopped() -> Self {
        Self {
            process_count: "2",
            ..Self::running()
        }
    }

    fn handle(&self, args: &[&str]) -> Result<String> {
        self.calls.set(self.calls.get() + 1);
        match args {
            ["command", "-v", "podman"] if self.podman_installed => Ok("/usr/bin/podman".into()),
            ["command", "-v", "podman"] => bail!("`command -v podman` failed: exit status: 1"),
            ["bash", "-c", script] if script.contains("podman system service") => {
                Ok(self.process_count.to_string())
            }
            _ => bail!("unexpected guest command: {}", args.join(" ")),
        }
    }
}

impl ExecutionChannel for FakeGuest {
    async fn run(&self, args: &[&str]) -> Result<()> {
        self.handle(args).map(drop)
    }
    async fn run_output(&self, args: &[&str]) -> Result<String> {
        self.handle(args)
    }
    async fn run_quiet(&self, args: &[&str]) -> Result<()> {
        self.handle(args).map(drop)
    }
    async fn run_interactive(&self, args: &[&str]) -> Result<()> {
        self.handle(args).map(drop)
    }
}

// ── Reporter ──────────────────────────────────────────────────────────────────

pub struct SilentReporter;

impl ProgressReporter for SilentReporter {
    fn step(&self, _: &str) {}
    fn success(&self, _: &str) {}
    fn warn(&self, _: &str) {}
}
