use log::{debug, error, info, warn};
use std::error::Error;
use std::io::{self, Write};

use crate::shell::error::ShellError;
use crate::shell::executor::Executor;
use crate::shell::parser::Parser;
use crate::shell::readline::{ReadlineError, ReadlineManager};
use crate::shell::signals;
use crate::shell::state::ShellState;
use crate::utils::config::Config;
use crate::utils::theme::Theme;

const EXIT_COMMAND: &str = "exit";

/// What the loop should do with one line of input.
#[derive(Debug, PartialEq, Eq)]
enum LineAction<'l> {
    Skip,
    Exit,
    Run(&'l str),
}

fn classify(line: &str) -> LineAction<'_> {
    let line = line.trim_end_matches(&['\n', '\r'][..]);
    if line.trim().is_empty() {
        LineAction::Skip
    } else if line.trim() == EXIT_COMMAND {
        LineAction::Exit
    } else {
        LineAction::Run(line)
    }
}

pub struct Shell<'a> {
    config: &'a Config,
    theme: Theme,
    readline: ReadlineManager<'a>,
    state: ShellState,
    executor: Executor,
}

impl<'a> Shell<'a> {
    pub fn new(config: &'a Config) -> Result<Self, Box<dyn Error>> {
        Ok(Self {
            config,
            theme: Theme::new(),
            readline: ReadlineManager::new(config)?,
            state: ShellState::from_process()?,
            executor: Executor::new(),
        })
    }

    pub fn run(&mut self) -> Result<(), Box<dyn Error>> {
        debug!("starting {}", self.config.name);
        signals::ignore_interactive_signals();
        self.readline.load_history()?;

        self.run_loop()?;
        self.readline.save_history()?;

        debug!("leaving {}", self.config.name);
        Ok(())
    }

    fn run_loop(&mut self) -> Result<(), Box<dyn Error>> {
        loop {
            io::stdout().flush()?;

            match self.readline.readline(&self.config.prompt) {
                Ok(line) => match classify(&line) {
                    LineAction::Skip => continue,
                    LineAction::Exit => {
                        debug!("exit requested");
                        break;
                    }
                    LineAction::Run(line) => {
                        if let Err(e) = self.readline.add_history(line) {
                            warn!("cannot add history entry: {}", e);
                        }
                        self.handle_line(line);
                    }
                },
                Err(ReadlineError::Eof) => {
                    info!("end of input, leaving");
                    println!();
                    break;
                }
                Err(ReadlineError::Interrupted) => {
                    debug!("line discarded by interrupt");
                }
                Err(ReadlineError::Io(err)) if err.kind() == io::ErrorKind::InvalidData => {
                    // the undecodable line is consumed, the next read starts after it
                    warn!("skipping line: {}", err);
                    eprintln!("{}", self.theme.error(format!("skipping line: {}", err)));
                }
                Err(err) => {
                    error!("readline failed: {}", err);
                    eprintln!("{}", self.theme.error(err.to_string()));
                    break;
                }
            }
        }
        Ok(())
    }

    /// Parses and runs one line. Nothing that goes wrong here ends the loop.
    fn handle_line(&mut self, line: &str) {
        debug!("line: {:?}", line);
        let mut parser =
            Parser::new(&mut self.state).with_limits(self.config.max_arguments, self.config.max_commands);
        let parsed = parser.build(line);
        for notice in parser.take_diagnostics() {
            eprintln!("{}", self.theme.warning(notice.to_string()));
        }

        let node = match parsed {
            Ok(node) => node,
            Err(e) => {
                self.report(&ShellError::from(e));
                return;
            }
        };

        match self.executor.execute(&node, &self.state) {
            Ok(status) if status.is_success() => debug!("line finished: {}", status),
            Ok(status) => info!("line finished: {}", status),
            Err(e) => self.report(&e),
        }
    }

    fn report(&self, err: &ShellError) {
        warn!("{}", err);
        eprintln!("{}", self.theme.error(err.to_string()));
    }
}
