//! `handranks.dat` binary I/O, spec §6.1. Little-endian fixed-offset layout: magic,
//! version, bitmask size, product count, then the flush table, the unique5 table, and
//! the sorted product table. Uses `byteorder` for explicit field widths rather than a
//! `serde`-derived format, since the layout is a fixed byte offset table, not a
//! self-describing structure.

use crate::cards::evaluator::{Evaluator, TABLE_SIZE};
use crate::error::SolverError;
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io::{BufReader, BufWriter, Read, Write};

const MAGIC: u32 = 0x48524E4B; // "HRNK" little-endian
const VERSION: u32 = 3;
const BITMASK_SIZE: u32 = TABLE_SIZE as u32;

pub fn write_handranks<W: Write>(evaluator: &Evaluator, writer: W) -> Result<(), SolverError> {
    let mut out = BufWriter::new(writer);
    let products = evaluator.products();
    (|| -> std::io::Result<()> {
        out.write_u32::<LittleEndian>(MAGIC)?;
        out.write_u32::<LittleEndian>(VERSION)?;
        out.write_u32::<LittleEndian>(BITMASK_SIZE)?;
        out.write_u32::<LittleEndian>(products.len() as u32)?;
        for &value in evaluator.flush_table().iter() {
            out.write_u16::<LittleEndian>(value)?;
        }
        for &value in evaluator.unique5_table().iter() {
            out.write_u16::<LittleEndian>(value)?;
        }
        for &(product, rank) in products {
            out.write_u32::<LittleEndian>(product as u32)?;
            out.write_u16::<LittleEndian>(rank)?;
        }
        out.flush()
    })()
    .map_err(|e| SolverError::TableFileMalformed {
        path: "<writer>".to_string(),
        reason: e.to_string(),
    })
}

pub fn read_handranks<R: Read>(reader: R, path: &str) -> Result<Evaluator, SolverError> {
    let mut input = BufReader::new(reader);
    let malformed = |reason: String| SolverError::TableFileMalformed {
        path: path.to_string(),
        reason,
    };

    let magic = input.read_u32::<LittleEndian>().map_err(|e| malformed(e.to_string()))?;
    if magic != MAGIC {
        return Err(malformed(format!("bad magic {magic:#x}, expected {MAGIC:#x}")));
    }
    let _version = input.read_u32::<LittleEndian>().map_err(|e| malformed(e.to_string()))?;
    let bitmask_size = input.read_u32::<LittleEndian>().map_err(|e| malformed(e.to_string()))?;
    if bitmask_size != BITMASK_SIZE {
        return Err(malformed(format!("bitmask_size {bitmask_size} != expected {BITMASK_SIZE}")));
    }
    let num_products = input.read_u32::<LittleEndian>().map_err(|e| malformed(e.to_string()))? as usize;

    let mut flush_table = Box::new([0u16; TABLE_SIZE]);
    for slot in flush_table.iter_mut() {
        *slot = input.read_u16::<LittleEndian>().map_err(|e| malformed(e.to_string()))?;
    }
    let mut unique5_table = Box::new([0u16; TABLE_SIZE]);
    for slot in unique5_table.iter_mut() {
        *slot = input.read_u16::<LittleEndian>().map_err(|e| malformed(e.to_string()))?;
    }
    let mut products = Vec::with_capacity(num_products);
    for _ in 0..num_products {
        let product = input.read_u32::<LittleEndian>().map_err(|e| malformed(e.to_string()))? as u64;
        let rank = input.read_u16::<LittleEndian>().map_err(|e| malformed(e.to_string()))?;
        products.push((product, rank));
    }

    Ok(Evaluator::from_tables(flush_table, unique5_table, products))
}

/// the table-file load policy of spec §7: missing or malformed files are fatal to the
/// loader, but the driver regenerates from scratch and writes a fresh file, retrying
/// the load exactly once before giving up.
pub fn load_or_build(path: &std::path::Path) -> Result<Evaluator, SolverError> {
    match std::fs::File::open(path) {
        Ok(file) => match read_handranks(file, &path.display().to_string()) {
            Ok(evaluator) => Ok(evaluator),
            Err(reason) => {
                log::warn!("{path:?} is malformed ({reason}); rebuilding");
                regenerate_and_write(path)
            }
        },
        Err(_) => {
            log::info!("{path:?} not found; building evaluator tables from scratch");
            regenerate_and_write(path)
        }
    }
}

fn regenerate_and_write(path: &std::path::Path) -> Result<Evaluator, SolverError> {
    let evaluator = Evaluator::build();
    let file = std::fs::File::create(path).map_err(|e| SolverError::TableFileMalformed {
        path: path.display().to_string(),
        reason: format!("could not create file for rebuild: {e}"),
    })?;
    write_handranks(&evaluator, file)?;
    log::info!("wrote rebuilt evaluator tables to {path:?}");
    Ok(evaluator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Card, Hand};

    #[test]
    fn round_trips_through_bytes() {
        let evaluator = Evaluator::build();
        let mut buffer = Vec::new();
        write_handranks(&evaluator, &mut buffer).unwrap();
        let loaded = read_handranks(&buffer[..], "memory").unwrap();

        assert_eq!(evaluator.flush_table(), loaded.flush_table());
        assert_eq!(evaluator.unique5_table(), loaded.unique5_table());
        assert_eq!(evaluator.products(), loaded.products());

        let hand: Hand = vec![
            Card::try_from("Ah").unwrap(),
            Card::try_from("Kh").unwrap(),
            Card::try_from("Qh").unwrap(),
            Card::try_from("Jh").unwrap(),
            Card::try_from("Th").unwrap(),
            Card::try_from("2c").unwrap(),
            Card::try_from("3d").unwrap(),
        ]
        .into();
        assert_eq!(evaluator.evaluate(&hand).unwrap(), loaded.evaluate(&hand).unwrap());
    }

    #[test]
    fn rejects_bad_magic() {
        let mut buffer = Vec::new();
        buffer.write_u32::<LittleEndian>(0xDEAD_BEEF).unwrap();
        let result = read_handranks(&buffer[..], "bad.dat");
        assert!(matches!(result, Err(SolverError::TableFileMalformed { .. })));
    }
}
