use crate::*;
use anyhow::Context;
use std::io::Read;
use std::io::Write;
use std::path::PathBuf;
use std::process::Child;
use std::process::Command;
use std::process::Stdio;
use std::time::Duration;
use std::time::Instant;

/// Anything that finds equilibria of an exported game.
///
/// Each returned profile is flat, ordered player → infoset (creation
/// order) → action, one probability per action.
pub trait Engine {
    fn solve(&self, game: &Efg) -> Result<Vec<Vec<Probability>>>;
}

/// Gambit's `gambit-lcp`, fed `.efg` text on stdin.
#[derive(Debug, Clone)]
pub struct Gambit {
    program: PathBuf,
    timeout: Duration,
}

impl Default for Gambit {
    fn default() -> Self {
        Self::new(SOLVER_PROGRAM, SOLVER_TIMEOUT)
    }
}

impl Gambit {
    pub fn new(program: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            timeout,
        }
    }
    /// defaults overridden by GAMBIT_LCP and GAMBIT_TIMEOUT ("30s", "5m")
    pub fn from_env() -> Self {
        let program = std::env::var("GAMBIT_LCP")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(SOLVER_PROGRAM));
        let timeout = match std::env::var("GAMBIT_TIMEOUT") {
            Err(_) => SOLVER_TIMEOUT,
            Ok(s) => parse_duration(&s).unwrap_or_else(|| {
                log::warn!("ignoring unparseable GAMBIT_TIMEOUT {:?}", s);
                SOLVER_TIMEOUT
            }),
        };
        Self::new(program, timeout)
    }
    pub fn program(&self) -> &std::path::Path {
        &self.program
    }
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// run the solver to completion or until the timeout expires.
    /// the child is killed and reaped on every failure.
    fn run(&self, text: &str) -> Result<String> {
        let mut child = Command::new(&self.program)
            .arg("-q")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .with_context(|| format!("spawning {}", self.program.display()))?;
        match self.supervise(&mut child, text) {
            Ok(stdout) => Ok(stdout),
            Err(e) => {
                let _ = child.kill();
                let _ = child.wait();
                Err(e)
            }
        }
    }

    fn supervise(&self, child: &mut Child, text: &str) -> Result<String> {
        let stdin = feed(child.stdin.take().context("engine stdin")?, text.to_owned());
        let stdout = drain(child.stdout.take().context("engine stdout")?);
        let stderr = drain(child.stderr.take().context("engine stderr")?);
        let start = Instant::now();
        let status = loop {
            match child.try_wait().context("waiting on engine")? {
                Some(status) => break status,
                None if start.elapsed() >= self.timeout => {
                    log::warn!("killing {} after {:?}", self.program.display(), self.timeout);
                    return Err(Error::Timeout(self.timeout));
                }
                None => std::thread::sleep(SOLVER_POLL),
            }
        };
        let stdout = collect(stdout).context("reading engine stdout")?;
        let stderr = collect(stderr).unwrap_or_default();
        if !status.success() {
            return Err(anyhow::anyhow!(
                "{} exited with {}: {}",
                self.program.display(),
                status,
                stderr.trim()
            )
            .into());
        }
        match stdin.join() {
            Err(_) => Err(anyhow::anyhow!("pipe writer panicked").into()),
            Ok(Err(e)) if e.kind() != std::io::ErrorKind::BrokenPipe => {
                Err(anyhow::Error::from(e).context("writing game to engine").into())
            }
            Ok(_) => Ok(stdout),
        }
    }
}

impl Engine for Gambit {
    fn solve(&self, game: &Efg) -> Result<Vec<Vec<Probability>>> {
        log::debug!("running {} on {} nodes", self.program.display(), game.nodes.len());
        let output = self.run(&game.to_string())?;
        Ok(parse(&output)?)
    }
}

type Reader = std::thread::JoinHandle<std::io::Result<String>>;
type Writer = std::thread::JoinHandle<std::io::Result<()>>;

/// write the game on a helper thread so a child that never reads
/// cannot stall the timeout. dropping the pipe afterwards closes stdin.
fn feed(mut pipe: impl Write + Send + 'static, text: String) -> Writer {
    std::thread::spawn(move || pipe.write_all(text.as_bytes()))
}

/// read a pipe to its end on a helper thread so the child never blocks
fn drain(mut pipe: impl Read + Send + 'static) -> Reader {
    std::thread::spawn(move || {
        let mut buffer = String::new();
        pipe.read_to_string(&mut buffer).map(|_| buffer)
    })
}

fn collect(reader: Reader) -> anyhow::Result<String> {
    reader
        .join()
        .map_err(|_| anyhow::anyhow!("pipe reader panicked"))?
        .map_err(anyhow::Error::from)
}

/// `NE,` lines of `gambit-lcp -q`, everything else ignored
fn parse(output: &str) -> anyhow::Result<Vec<Vec<Probability>>> {
    output
        .lines()
        .map(str::trim)
        .filter_map(|line| line.strip_prefix("NE,"))
        .map(|line| {
            line.split(',')
                .map(str::trim)
                .map(number)
                .collect::<anyhow::Result<Vec<Probability>>>()
        })
        .collect()
}

/// decimal or exact rational "p/q"
fn number(token: &str) -> anyhow::Result<Probability> {
    match token.split_once('/') {
        None => token
            .parse::<Probability>()
            .with_context(|| format!("bad probability {:?}", token)),
        Some((p, q)) => {
            let p = p
                .parse::<Probability>()
                .with_context(|| format!("bad numerator in {:?}", token))?;
            let q = q
                .parse::<Probability>()
                .with_context(|| format!("bad denominator in {:?}", token))?;
            anyhow::ensure!(q != 0., "zero denominator in {:?}", token);
            Ok(p / q)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rationals_and_decimals() {
        let output = "Compute Nash equilibria\nNE,1/2,1/2,1,0\nNE,0.25,0.75,0,1\n";
        let profiles = parse(output).unwrap();
        assert_eq!(profiles, vec![vec![0.5, 0.5, 1., 0.], vec![0.25, 0.75, 0., 1.]]);
    }
    #[test]
    fn ignores_chatter() {
        assert!(parse("no equilibria here\n").unwrap().is_empty());
    }
    #[test]
    fn rejects_garbage() {
        assert!(parse("NE,1/0,1").is_err());
        assert!(parse("NE,half,1").is_err());
    }
    #[test]
    fn missing_program_is_an_engine_error() {
        let gambit = Gambit::new("/nonexistent/gambit-lcp", Duration::from_secs(1));
        assert!(matches!(gambit.solve(&Efg::new("")), Err(Error::Engine(_))));
    }
    /// an executable shell script that stalls without reading stdin
    #[cfg(unix)]
    fn stalling(name: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;
        let path = std::env::temp_dir().join(format!("efgame-{}-{}.sh", name, std::process::id()));
        std::fs::write(&path, "#!/bin/sh\nexec sleep 20\n").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }
    #[cfg(unix)]
    #[test]
    fn stalled_engine_times_out() {
        let ref path = stalling("stall");
        let gambit = Gambit::new(path, Duration::from_millis(500));
        let start = Instant::now();
        let result = gambit.solve(&Efg::new("stall"));
        assert!(matches!(result, Err(Error::Timeout(_))));
        assert!(start.elapsed() < Duration::from_secs(10));
        let _ = std::fs::remove_file(path);
    }
    #[cfg(unix)]
    #[test]
    fn unread_input_cannot_block_the_timeout() {
        let ref path = stalling("unread");
        let gambit = Gambit::new(path, Duration::from_millis(500));
        let game = Efg::new("x".repeat(1 << 20));
        let start = Instant::now();
        let result = gambit.solve(&game);
        assert!(matches!(result, Err(Error::Timeout(_))));
        assert!(start.elapsed() < Duration::from_secs(10));
        let _ = std::fs::remove_file(path);
    }
    #[test]
    fn default_points_at_lcp() {
        let gambit = Gambit::default();
        assert_eq!(gambit.program(), std::path::Path::new(SOLVER_PROGRAM));
        assert_eq!(gambit.timeout(), SOLVER_TIMEOUT);
    }
}
