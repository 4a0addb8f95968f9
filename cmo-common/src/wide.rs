//! Length-prefixed UTF-16LE string codec.
//!
//! CMO strings are a `u32` code-unit count followed by that many UTF-16LE
//! code units. Counts written by the original export pipeline include a
//! trailing NUL code unit; decoding stops at the first NUL and re-encoding
//! does not append one.

use std::io::{self, Read, Write};

/// Read one length-prefixed UTF-16LE string.
///
/// The decoded string is cut at the first NUL code unit. Unpaired surrogates
/// are replaced rather than rejected; callers make no well-formedness
/// guarantee about the input.
pub fn read_wide(reader: &mut impl Read) -> io::Result<String> {
    let mut len = [0u8; 4];
    reader.read_exact(&mut len)?;
    let count = u32::from_le_bytes(len);

    let mut bytes = vec![0u8; count as usize * 2];
    reader.read_exact(&mut bytes)?;

    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .take_while(|&unit| unit != 0)
        .collect();
    Ok(String::from_utf16_lossy(&units))
}

/// Write one length-prefixed UTF-16LE string. No NUL terminator is appended;
/// the count is exactly the number of code units in `s`.
pub fn write_wide(writer: &mut impl Write, s: &str) -> io::Result<()> {
    let units: Vec<u16> = s.encode_utf16().collect();
    writer.write_all(&(units.len() as u32).to_le_bytes())?;
    for unit in &units {
        writer.write_all(&unit.to_le_bytes())?;
    }
    Ok(())
}
