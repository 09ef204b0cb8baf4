//! Plain-text model format.
//!
//! ```text
//! [neuralnetwork]
//! neuron: <gid> <nid> <activator|nil> <bias>
//! connect: <src gid> <src nid> <dst gid> <dst nid> <weight>
//! ```
//!
//! Floats are written with the shortest representation that parses back to
//! the same bits, so a save/load cycle reproduces every parameter exactly.

use std::fmt;
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::str::{FromStr, SplitWhitespace};

use crate::activation::activation::Activator;
use crate::error::{NeuzError, Result};
use crate::network::network::Network;

pub const NETWORK_TAG: &str = "neuralnetwork";
const NEURON_KEY: &str = "neuron";
const CONNECT_KEY: &str = "connect";
const NIL: &str = "nil";

struct NeuronRecord {
    gid: usize,
    nid: usize,
    activator: Option<Activator>,
    bias: f64,
}

struct ConnectRecord {
    line: usize,
    ugid: usize,
    unid: usize,
    dgid: usize,
    dnid: usize,
    weight: f64,
}

/// Whitespace-separated fields of one record line.
struct Fields<'a> {
    line: usize,
    iter: SplitWhitespace<'a>,
}

impl<'a> Fields<'a> {
    fn new(line: usize, text: &'a str) -> Fields<'a> {
        Fields { line, iter: text.split_whitespace() }
    }

    fn token(&mut self, what: &str) -> Result<&'a str> {
        self.iter.next().ok_or_else(|| NeuzError::Parse {
            line: self.line,
            message: format!("missing {}", what),
        })
    }

    fn parse<T: FromStr>(&mut self, what: &str) -> Result<T> {
        let token = self.token(what)?;
        token.parse().map_err(|_| NeuzError::Parse {
            line: self.line,
            message: format!("invalid {} `{}`", what, token),
        })
    }

    fn finish(mut self) -> Result<()> {
        match self.iter.next() {
            None => Ok(()),
            Some(extra) => Err(NeuzError::Parse {
                line: self.line,
                message: format!("unexpected trailing field `{}`", extra),
            }),
        }
    }
}

fn parse_activator(token: &str) -> Option<Activator> {
    if token == NIL {
        return None;
    }
    match Activator::by_name(token) {
        Ok(activator) => Some(activator),
        Err(err) => {
            log::warn!("{}; neuron loaded without an activator", err);
            None
        }
    }
}

fn parse_neuron(line: usize, text: &str) -> Result<NeuronRecord> {
    let mut fields = Fields::new(line, text);
    let record = NeuronRecord {
        gid: fields.parse("group id")?,
        nid: fields.parse("neuron id")?,
        activator: parse_activator(fields.token("activator")?),
        bias: fields.parse("bias")?,
    };
    fields.finish()?;
    Ok(record)
}

fn parse_connect(line: usize, text: &str) -> Result<ConnectRecord> {
    let mut fields = Fields::new(line, text);
    let record = ConnectRecord {
        line,
        ugid: fields.parse("upstream group id")?,
        unid: fields.parse("upstream neuron id")?,
        dgid: fields.parse("downstream group id")?,
        dnid: fields.parse("downstream neuron id")?,
        weight: fields.parse("weight")?,
    };
    fields.finish()?;
    Ok(record)
}

/// Record form of a network: groups in order, neurons in group order, each
/// neuron followed by its incoming axons.
struct Records<'a>(&'a Network);

impl fmt::Display for Records<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[{}]", NETWORK_TAG)?;
        for group in self.0.groups() {
            for neuron in group.neurons() {
                let id = neuron.id();
                let activator = neuron.activator().map_or(NIL, |a| a.name());
                writeln!(f, "{}: {} {} {} {}", NEURON_KEY, id.group, id.neuron, activator, neuron.bias())?;
                for axon in neuron.axons() {
                    let up = axon.upstream();
                    writeln!(
                        f,
                        "{}: {} {} {} {} {}",
                        CONNECT_KEY, up.group, up.neuron, id.group, id.neuron, axon.weight()
                    )?;
                }
            }
        }
        writeln!(f)
    }
}

impl Network {
    /// Writes the record form to `w`.
    pub fn write_records<W: Write>(&self, w: &mut W) -> io::Result<()> {
        write!(w, "{}", Records(self))
    }

    pub fn to_records(&self) -> String {
        Records(self).to_string()
    }

    /// Rebuilds a network from its record form.
    ///
    /// All `neuron:` records are applied before any `connect:` record, so the
    /// order of lines does not matter. Lines outside the `[neuralnetwork]`
    /// section and `%` comments are ignored.
    pub fn from_records(text: &str) -> Result<Network> {
        let mut neurons = Vec::new();
        let mut connects = Vec::new();
        let mut in_section = false;
        let mut found = false;

        for (index, raw) in text.lines().enumerate() {
            let line = index + 1;
            let content = raw.split('%').next().unwrap_or("").trim();
            if content.is_empty() {
                continue;
            }
            if let Some(tag) = content.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
                in_section = tag.trim() == NETWORK_TAG;
                found |= in_section;
                continue;
            }
            if !in_section {
                continue;
            }
            let (key, values) = content.split_once(':').ok_or_else(|| NeuzError::Parse {
                line,
                message: format!("expected `key: values`, got `{}`", content),
            })?;
            match key.trim() {
                NEURON_KEY => neurons.push(parse_neuron(line, values)?),
                CONNECT_KEY => connects.push(parse_connect(line, values)?),
                other => log::warn!("line {}: unknown key `{}` skipped", line, other),
            }
        }
        if !found {
            return Err(NeuzError::MissingTag { tag: NETWORK_TAG.to_string() });
        }

        let mut net = Network::new();
        for r in &neurons {
            net.add_neuron(r.gid, r.nid, r.activator, r.bias)?;
        }
        for r in &connects {
            net.connect(r.ugid, r.unid, r.dgid, r.dnid, r.weight).map_err(|err| {
                log::warn!("line {}: {}", r.line, err);
                err
            })?;
        }
        log::debug!(
            "read {} neuron(s) and {} axon(s) in {} group(s)",
            neurons.len(), connects.len(), net.group_count()
        );
        Ok(net)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = fs::File::create(path).map_err(|source| NeuzError::FileOpenFailure {
            path: path.to_path_buf(),
            source,
        })?;
        let mut writer = BufWriter::new(file);
        self.write_records(&mut writer)?;
        writer.flush()?;
        log::debug!("saved network ({} groups) to {}", self.group_count(), path.display());
        Ok(())
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Network> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| NeuzError::FileOpenFailure {
            path: path.to_path_buf(),
            source,
        })?;
        let net = Network::from_records(&text)?;
        log::debug!("loaded network ({} groups) from {}", net.group_count(), path.display());
        Ok(net)
    }
}

impl FromStr for Network {
    type Err = NeuzError;

    fn from_str(s: &str) -> Result<Network> {
        Network::from_records(s)
    }
}
