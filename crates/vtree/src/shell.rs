//! Line-oriented command driver over a [`Namespace`]
//!
//! Every command maps onto exactly one namespace operation; failures are
//! returned as `anyhow` errors wrapping the underlying [`TreeError`].

use crate::render::{render, RenderOptions};
use crate::tree::{Namespace, NodeKind, TreeError};
use anyhow::{anyhow, bail, Context, Result};
use log::{debug, info};

const HELP: &str = "\
commands:
  mkdir <parent> <name>            create a folder
  touch <parent> <name> [text...]  create a file
  rm <path>                        delete an entry and everything below it
  mv <source> <dest>               move an entry into a folder
  rename <path> <name>             rename an entry
  ls [path]                        list a folder
  cat <path>                       print a file
  edit <path> <text...>            replace a file's content
  size [path]                      count entries in a subtree
  tree                             draw the whole tree
  help                             show this text";

/// A parsed shell command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Mkdir { parent: String, name: String },
    Touch {
        parent: String,
        name: String,
        content: Option<String>,
    },
    Rm { path: String },
    Mv { source: String, dest: String },
    Rename { path: String, name: String },
    Ls { path: String },
    Cat { path: String },
    Edit { path: String, content: String },
    Size { path: Option<String> },
    Tree,
    Help,
}

impl Command {
    /// Parse one input line. Blank lines and `#` comments yield `None`.
    ///
    /// File content for `touch` and `edit` is the rest of the line after a
    /// single separator, whitespace included.
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let line = line.trim_start().trim_end_matches(['\r', '\n']);
        if line.trim().is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let mut words = line.split_whitespace();
        let verb = words.next().unwrap_or_default();
        let args: Vec<&str> = words.collect();
        let arg = |index: usize| -> Result<String> {
            args.get(index)
                .map(|s| s.to_string())
                .ok_or_else(|| anyhow!("'{}' is missing argument {}", verb, index + 1))
        };
        let rest = |from: usize| -> Option<String> {
            let (words, tail) = split_words(line, from + 1);
            (words.len() == from + 1 && !tail.is_empty()).then(|| tail.to_string())
        };

        let command = match verb {
            "mkdir" => Command::Mkdir {
                parent: arg(0)?,
                name: arg(1)?,
            },
            "touch" => Command::Touch {
                parent: arg(0)?,
                name: arg(1)?,
                content: rest(2),
            },
            "rm" => Command::Rm { path: arg(0)? },
            "mv" => Command::Mv {
                source: arg(0)?,
                dest: arg(1)?,
            },
            "rename" => Command::Rename {
                path: arg(0)?,
                name: arg(1)?,
            },
            "ls" => Command::Ls {
                path: arg(0).unwrap_or_else(|_| "/".to_string()),
            },
            "cat" => Command::Cat { path: arg(0)? },
            "edit" => Command::Edit {
                path: arg(0)?,
                content: rest(1).unwrap_or_default(),
            },
            "size" => Command::Size { path: arg(0).ok() },
            "tree" => Command::Tree,
            "help" => Command::Help,
            other => bail!("unknown command '{}'", other),
        };
        Ok(Some(command))
    }
}

/// Take up to `count` whitespace-separated words and return the remainder
/// with its one leading separator removed
fn split_words(line: &str, count: usize) -> (Vec<&str>, &str) {
    let mut words = Vec::with_capacity(count);
    let mut rest = line;
    while words.len() < count {
        rest = rest.trim_start();
        if rest.is_empty() {
            break;
        }
        let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        words.push(&rest[..end]);
        rest = &rest[end..];
    }

    let mut chars = rest.chars();
    if matches!(chars.next(), Some(c) if c.is_whitespace()) {
        rest = chars.as_str();
    }
    (words, rest)
}

/// Owns a namespace and executes commands against it
#[derive(Debug, Default)]
pub struct Shell {
    tree: Namespace,
    options: RenderOptions,
}

impl Shell {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use custom rendering options for `tree`
    pub fn with_options(options: RenderOptions) -> Self {
        Self {
            tree: Namespace::new(),
            options,
        }
    }

    pub fn namespace(&self) -> &Namespace {
        &self.tree
    }

    /// Parse and execute one line, returning the text to print
    pub fn run_line(&mut self, line: &str) -> Result<String> {
        match Command::parse(line)? {
            Some(command) => self.execute(command),
            None => Ok(String::new()),
        }
    }

    /// Execute a command, returning the text to print
    pub fn execute(&mut self, command: Command) -> Result<String> {
        debug!("executing {:?}", command);
        let output = match command {
            Command::Mkdir { parent, name } => {
                self.tree
                    .insert(&parent, &name, NodeKind::Container, None)
                    .with_context(|| format!("mkdir {} {}", parent, name))?;
                String::new()
            }
            Command::Touch {
                parent,
                name,
                content,
            } => {
                self.tree
                    .insert(&parent, &name, NodeKind::Leaf, content)
                    .with_context(|| format!("touch {} {}", parent, name))?;
                String::new()
            }
            Command::Rm { path } => {
                self.tree
                    .delete(&path)
                    .with_context(|| format!("rm {}", path))?;
                String::new()
            }
            Command::Mv { source, dest } => {
                self.tree
                    .move_node(&source, &dest)
                    .with_context(|| format!("mv {} {}", source, dest))?;
                String::new()
            }
            Command::Rename { path, name } => {
                self.tree
                    .rename(&path, &name)
                    .with_context(|| format!("rename {} {}", path, name))?;
                String::new()
            }
            Command::Ls { path } => self
                .tree
                .list(&path)
                .with_context(|| format!("ls {}", path))?
                .iter()
                .map(|entry| format!("{}\n", entry))
                .collect::<String>(),
            Command::Cat { path } => {
                let text = self
                    .tree
                    .read(&path)
                    .with_context(|| format!("cat {}", path))?;
                format!("{}\n", text)
            }
            Command::Edit { path, content } => {
                self.tree
                    .write_content(&path, content)
                    .with_context(|| format!("edit {}", path))?;
                String::new()
            }
            Command::Size { path } => {
                let size = self
                    .tree
                    .size(path.as_deref())
                    .context("size")?;
                format!("{}\n", size)
            }
            Command::Tree => render(&self.tree, &self.options),
            Command::Help => format!("{}\n", HELP),
        };
        Ok(output)
    }

    /// Run a script, stopping at the first failing line
    pub fn run_script(&mut self, script: &str) -> Result<String> {
        let mut output = String::new();
        for (number, line) in script.lines().enumerate() {
            let text = self
                .run_line(line)
                .with_context(|| format!("line {}", number + 1))?;
            output.push_str(&text);
        }
        Ok(output)
    }

    /// Populate the sample hierarchy and exercise read, rename and listing.
    ///
    /// Expected failures are reported inline instead of aborting the demo.
    pub fn run_demo(&mut self) -> Result<String> {
        info!("running demo scenario");
        let mut output = self.run_script(DEMO_SETUP)?;
        output.push_str(&self.run_line("tree")?);

        output.push_str("\n--- cat ---\n");
        output.push_str(&self.run_line("cat /Apps/main.py")?);
        for failing in ["cat /Documents", "cat /Missing"] {
            output.push_str(&self.report(failing));
        }

        output.push_str("\n--- rename ---\n");
        self.run_line("rename /Documents/Report.txt Final_Report.txt")?;
        self.run_line("rename /Apps Programs")?;
        output.push_str(&self.report("rename /Documents/Photos Final_Report.txt"));

        output.push_str("\n--- final tree ---\n");
        output.push_str(&self.run_line("tree")?);
        output.push_str("\n--- ls /Programs ---\n");
        output.push_str(&self.run_line("ls /Programs")?);
        Ok(output)
    }

    /// Run a line expected to fail and describe the outcome
    fn report(&mut self, line: &str) -> String {
        match self.run_line(line) {
            Ok(text) => text,
            Err(err) => match err.downcast_ref::<TreeError>() {
                Some(cause) => format!("error ({}): {}\n", cause.kind(), cause),
                None => format!("error: {:#}\n", err),
            },
        }
    }
}

const DEMO_SETUP: &str = "\
mkdir / Documents
touch /Documents Report.txt First draft of the report. Details still missing.
mkdir /Documents Photos
touch /Documents/Photos dog.jpg A photo of the dachshund.
mkdir / Apps
touch /Apps main.py print('hello world')
";
