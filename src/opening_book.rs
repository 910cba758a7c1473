//! Precomputed exact scores for shallow positions
//!
//! The book maps the symmetric key of any position of up to `depth` moves to
//! its exact score, cutting off the most expensive prefix of the search
//! tree. Storage and collision behaviour are those of
//! [`TranspositionTable`]; the generator sizes the table so that probing a
//! stored position can never alias.

use anyhow::{bail, Context, Result};
use log::info;

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use crate::bitboard::BitBoard;
use crate::transposition_table::TranspositionTable;
use crate::{HEIGHT, WIDTH};

// a book table stores keys 1, 2 or 4 bytes wide depending on the file header
enum BookTable {
    Narrow(TranspositionTable<u8>),
    Medium(TranspositionTable<u16>),
    Wide(TranspositionTable<u32>),
}

impl BookTable {
    fn get(&self, key: u64) -> u8 {
        match self {
            BookTable::Narrow(table) => table.get(key),
            BookTable::Medium(table) => table.get(key),
            BookTable::Wide(table) => table.get(key),
        }
    }

    fn read_entries<R: Read>(&mut self, reader: &mut R) -> std::io::Result<()> {
        match self {
            BookTable::Narrow(table) => table.read_entries(reader),
            BookTable::Medium(table) => table.read_entries(reader),
            BookTable::Wide(table) => table.read_entries(reader),
        }
    }

    fn write_entries<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        match self {
            BookTable::Narrow(table) => table.write_entries(writer),
            BookTable::Medium(table) => table.write_entries(writer),
            BookTable::Wide(table) => table.write_entries(writer),
        }
    }

    fn partial_key_bytes(&self) -> u8 {
        match self {
            BookTable::Narrow(_) => 1,
            BookTable::Medium(_) => 2,
            BookTable::Wide(_) => 4,
        }
    }

    fn log_size(&self) -> u8 {
        match self {
            BookTable::Narrow(table) => table.log_size(),
            BookTable::Medium(table) => table.log_size(),
            BookTable::Wide(table) => table.log_size(),
        }
    }

    fn size(&self) -> usize {
        match self {
            BookTable::Narrow(table) => table.size(),
            BookTable::Medium(table) => table.size(),
            BookTable::Wide(table) => table.size(),
        }
    }
}

/// A read-only opening book backed by a binary file
///
/// # File Format
/// A 6-byte header of `width`, `height`, `depth`, `partial_key_bytes`,
/// `value_bytes` and `log_size`, followed by the table's
/// `next_prime(2^log_size)` little-endian partial keys and as many value
/// bytes. A book whose header disagrees with the compile-time board
/// dimensions is rejected.
pub struct OpeningBook {
    depth: usize,
    table: BookTable,
}

impl OpeningBook {
    /// Loads a book file, validating its header
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut file = BufReader::new(
            File::open(path)
                .with_context(|| format!("unable to open opening book {}", path.display()))?,
        );

        let mut header = [0u8; 6];
        file.read_exact(&mut header)
            .context("unable to read opening book header")?;
        let [width, height, depth, partial_key_bytes, value_bytes, log_size] = header;

        if width as usize != WIDTH {
            bail!("invalid opening book width (found {width}, expected {WIDTH})");
        }
        if height as usize != HEIGHT {
            bail!("invalid opening book height (found {height}, expected {HEIGHT})");
        }
        if depth as usize > WIDTH * HEIGHT {
            bail!("invalid opening book depth (found {depth})");
        }
        if value_bytes != 1 {
            bail!("invalid opening book value size (found {value_bytes} bytes, expected 1)");
        }
        if log_size > 40 {
            bail!("invalid opening book size exponent (found {log_size})");
        }
        let mut table = match partial_key_bytes {
            1 => BookTable::Narrow(TranspositionTable::new(log_size)),
            2 => BookTable::Medium(TranspositionTable::new(log_size)),
            4 => BookTable::Wide(TranspositionTable::new(log_size)),
            _ => bail!("invalid opening book key size (found {partial_key_bytes} bytes)"),
        };

        table
            .read_entries(&mut file)
            .context("unable to read opening book entries")?;

        info!(
            "loaded opening book {} (depth {}, {} slots)",
            path.display(),
            depth,
            table.size()
        );
        Ok(Self {
            depth: depth as usize,
            table,
        })
    }

    /// Wraps a freshly generated table into a book of the given depth
    pub fn from_table(depth: usize, table: TranspositionTable<u16>) -> Self {
        Self {
            depth,
            table: BookTable::Medium(table),
        }
    }

    /// Returns the stored score byte of a position, or 0 when the position
    /// is deeper than the book or simply absent
    pub fn get(&self, board: &BitBoard) -> u8 {
        if board.num_moves() > self.depth {
            0
        } else {
            self.table.get(board.key3())
        }
    }

    /// Returns the deepest move count the book covers
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Writes the book to a file in the format described above
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let mut file = BufWriter::new(
            File::create(path)
                .with_context(|| format!("unable to create opening book {}", path.display()))?,
        );

        let header = [
            WIDTH as u8,
            HEIGHT as u8,
            self.depth as u8,
            self.table.partial_key_bytes(),
            1,
            self.table.log_size(),
        ];
        file.write_all(&header)?;
        self.table.write_entries(&mut file)?;
        Ok(())
    }
}
