//! rMNK-landscapes instance loading and fitness evaluation.
//!
//! An instance defines M correlated NK fitness landscapes over bitstrings
//! of length N with epistasis degree K. Position `i` of objective `m`
//! draws its contribution from a lookup table indexed by the packed
//! values of the K+1 bits linked to that position.

use crate::bitstring::Bitstring;
use crate::error::Error;
use log::info;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// An immutable rMNK-landscapes problem instance.
///
/// Evaluation is pure and safe to share across threads behind `&self`.
#[derive(Debug, Clone)]
pub struct RmnkInstance {
    rho: f64,
    objectives: usize,
    bits: usize,
    epistasis: usize,
    /// `links[m][i]` lists the K+1 bit indices feeding contribution `i`
    /// of objective `m`.
    links: Vec<Vec<Vec<usize>>>,
    /// `tables[m][i]` holds the 2^(K+1) contributions for position `i`
    /// of objective `m`, indexed by the packed linked bits.
    tables: Vec<Vec<Vec<f64>>>,
}

impl RmnkInstance {
    /// Load an instance from a file on disk.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        Self::from_reader(File::open(path)?)
    }

    /// Load an instance from any reader holding the text format.
    ///
    /// Comment lines start with `c`; the body is `p rMNK` with the four
    /// parameters, `p links` with M*N*(K+1) bit indices, and `p tables`
    /// with M*N*2^(K+1) contributions, both read in `(i, j, m)` order.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, Error> {
        let mut text = String::new();
        let mut reader = BufReader::new(reader);
        reader.read_to_string(&mut text)?;

        let mut tokens = Tokens::new(&text);
        tokens.expect("p")?;
        tokens.expect("rMNK")?;

        let rho: f64 = tokens.parse("rho")?;
        let objectives: usize = tokens.parse("M")?;
        let bits: usize = tokens.parse("N")?;
        let epistasis: usize = tokens.parse("K")?;

        if objectives == 0 {
            return Err(Error::MalformedInstance("M must be at least 1".into()));
        }
        if bits == 0 {
            return Err(Error::MalformedInstance("N must be at least 1".into()));
        }
        if epistasis >= bits || epistasis + 1 >= usize::BITS as usize {
            return Err(Error::MalformedInstance(format!(
                "K = {} out of range, must lie in [0, N) with N = {}",
                epistasis, bits
            )));
        }

        tokens.expect("p")?;
        tokens.expect("links")?;

        let mut links = vec![vec![vec![0usize; epistasis + 1]; bits]; objectives];
        for i in 0..bits {
            for j in 0..epistasis + 1 {
                for m in 0..objectives {
                    let index: usize = tokens.parse("link index")?;
                    if index >= bits {
                        return Err(Error::MalformedInstance(format!(
                            "link index {} out of range for N = {}",
                            index, bits
                        )));
                    }
                    links[m][i][j] = index;
                }
            }
        }

        tokens.expect("p")?;
        tokens.expect("tables")?;

        let entries = 1usize << (epistasis + 1);
        let mut tables = vec![vec![vec![0f64; entries]; bits]; objectives];
        for i in 0..bits {
            for j in 0..entries {
                for m in 0..objectives {
                    tables[m][i][j] = tokens.parse("table contribution")?;
                }
            }
        }

        info!(
            "loaded rMNK instance: rho = {}, M = {}, N = {}, K = {}",
            rho, objectives, bits, epistasis
        );

        Ok(RmnkInstance {
            rho,
            objectives,
            bits,
            epistasis,
            links,
            tables,
        })
    }

    /// Inter-objective correlation parameter rho.
    pub fn rho(&self) -> f64 {
        self.rho
    }

    /// Number of objectives M.
    pub fn objectives(&self) -> usize {
        self.objectives
    }

    /// Bitstring length N.
    pub fn bits(&self) -> usize {
        self.bits
    }

    /// Epistasis degree K.
    pub fn epistasis(&self) -> usize {
        self.epistasis
    }

    /// Evaluate a decision vector, producing one value per objective.
    ///
    /// Each value is the mean over positions of the table contribution
    /// selected by the packed linked bits.
    pub fn evaluate(&self, decision: &Bitstring) -> Vec<f64> {
        assert_eq!(
            decision.len(),
            self.bits,
            "decision vector length {} does not match instance N = {}",
            decision.len(),
            self.bits
        );
        (0..self.objectives)
            .map(|m| {
                let total: f64 = (0..self.bits)
                    .map(|i| self.tables[m][i][self.sigma(m, decision, i)])
                    .sum();
                total / self.bits as f64
            })
            .collect()
    }

    /// Pack the K+1 bits linked to position `i` of objective `m` into an
    /// integer, with linked bit `j` occupying bit position `j`.
    pub fn sigma(&self, m: usize, decision: &Bitstring, i: usize) -> usize {
        let mut packed = 0usize;
        for (j, &bit) in self.links[m][i].iter().enumerate() {
            if decision.get(bit) {
                packed |= 1 << j;
            }
        }
        packed
    }
}

/// Whitespace token cursor over the instance text, skipping comment lines.
struct Tokens<'a> {
    tokens: std::vec::IntoIter<&'a str>,
}

impl<'a> Tokens<'a> {
    fn new(text: &'a str) -> Self {
        let tokens: Vec<&str> = text
            .lines()
            .filter(|line| !line.trim_start().starts_with('c'))
            .flat_map(str::split_whitespace)
            .collect();
        Tokens {
            tokens: tokens.into_iter(),
        }
    }

    fn next(&mut self, what: &str) -> Result<&'a str, Error> {
        self.tokens
            .next()
            .ok_or_else(|| Error::MalformedInstance(format!("unexpected end of input, expected {}", what)))
    }

    fn expect(&mut self, literal: &str) -> Result<(), Error> {
        let token = self.next(&format!("`{}`", literal))?;
        if token != literal {
            return Err(Error::MalformedInstance(format!(
                "expected `{}`, found `{}`",
                literal, token
            )));
        }
        Ok(())
    }

    fn parse<T: std::str::FromStr>(&mut self, what: &str) -> Result<T, Error> {
        let token = self.next(what)?;
        token.parse().map_err(|_| {
            Error::MalformedInstance(format!("expected {}, found `{}`", what, token))
        })
    }
}
