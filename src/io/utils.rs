//! Utilities for reading the raw output files.

use super::Endianness;
use crate::error::{Result, Sami2Error};
use byteorder::{BigEndian, ByteOrder, LittleEndian, NativeEndian};
use std::{
    fmt::Display,
    fs,
    io::{self, Read},
    mem,
    path::Path,
    str::FromStr,
};

/// Size of a Fortran record marker [bytes].
const RECORD_MARKER_SIZE: usize = mem::size_of::<i32>();

/// Reads and returns the content of the specified text file.
pub fn read_text_file<P: AsRef<Path>>(file_path: P) -> Result<String> {
    let file_path = file_path.as_ref();
    let file = fs::File::open(file_path).map_err(|err| Sami2Error::io(file_path, err))?;
    let mut text = String::new();
    let _ = io::BufReader::new(file)
        .read_to_string(&mut text)
        .map_err(|err| Sami2Error::io(file_path, err))?;
    Ok(text)
}

/// Reads a whitespace-delimited numerical table and returns the values
/// of each non-empty line.
///
/// Anything following a `#` on a line is ignored.
pub fn read_text_table_rows<T, P>(file_path: P) -> Result<Vec<Vec<T>>>
where
    T: FromStr,
    T::Err: Display,
    P: AsRef<Path>,
{
    let file_path = file_path.as_ref();
    let text = read_text_file(file_path)?;
    parse_table_rows(&text, file_path)
}

/// Reads a whitespace-delimited numerical table and returns all values
/// in reading order.
pub fn read_text_values<T, P>(file_path: P) -> Result<Vec<T>>
where
    T: FromStr,
    T::Err: Display,
    P: AsRef<Path>,
{
    Ok(read_text_table_rows(file_path)?
        .into_iter()
        .flatten()
        .collect())
}

fn parse_table_rows<T>(text: &str, file_path: &Path) -> Result<Vec<Vec<T>>>
where
    T: FromStr,
    T::Err: Display,
{
    text.lines()
        .map(|line| line.split('#').next().unwrap_or_default())
        .filter(|line| !line.trim().is_empty())
        .enumerate()
        .map(|(row, line)| {
            line.split_whitespace()
                .map(|token| parse_number(token, row, file_path))
                .collect()
        })
        .collect()
}

fn parse_number<T>(token: &str, row: usize, file_path: &Path) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    // Fortran writes double precision exponents with a D
    let normalized = token.replace(['D', 'd'], "E");
    normalized.parse::<T>().map_err(|err| {
        Sami2Error::table(
            file_path,
            format!("Failed parsing `{}` in row {}: {}", token, row, err),
        )
    })
}

/// Reads a file of unformatted sequential Fortran records holding
/// single-precision floats.
///
/// Each of the `n_records` records must hold `payload_len` values bracketed
/// by two record markers. The markers are verified and stripped, and the
/// payloads are returned concatenated in record order.
pub fn read_unformatted_records<P: AsRef<Path>>(
    file_path: P,
    payload_len: usize,
    n_records: usize,
    endianness: Endianness,
) -> Result<Vec<f32>> {
    let file_path = file_path.as_ref();
    let bytes = fs::read(file_path).map_err(|err| Sami2Error::io(file_path, err))?;
    match endianness {
        Endianness::Little => {
            decode_records::<LittleEndian>(&bytes, payload_len, n_records, file_path)
        }
        Endianness::Big => decode_records::<BigEndian>(&bytes, payload_len, n_records, file_path),
        Endianness::Native => {
            decode_records::<NativeEndian>(&bytes, payload_len, n_records, file_path)
        }
    }
}

fn decode_records<B: ByteOrder>(
    bytes: &[u8],
    payload_len: usize,
    n_records: usize,
    file_path: &Path,
) -> Result<Vec<f32>> {
    let payload_size = payload_len * mem::size_of::<f32>();
    let record_size = payload_size + 2 * RECORD_MARKER_SIZE;
    let expected_size = record_size * n_records;
    if bytes.len() != expected_size {
        return Err(Sami2Error::record(
            file_path,
            format!(
                "Expected {} records of {} values ({} bytes), found {} bytes",
                n_records,
                payload_len,
                expected_size,
                bytes.len()
            ),
        ));
    }

    let expected_marker = i32::try_from(payload_size).map_err(|_| {
        Sami2Error::record(
            file_path,
            format!("Record of {} bytes exceeds marker range", payload_size),
        )
    })?;

    let mut values = vec![0.0; payload_len * n_records];
    for (index, (record, payload)) in bytes
        .chunks_exact(record_size)
        .zip(values.chunks_exact_mut(payload_len.max(1)))
        .enumerate()
    {
        let leading_marker = B::read_i32(&record[..RECORD_MARKER_SIZE]);
        let trailing_marker = B::read_i32(&record[record_size - RECORD_MARKER_SIZE..]);
        if leading_marker != expected_marker || trailing_marker != expected_marker {
            return Err(Sami2Error::record(
                file_path,
                format!(
                    "Record {} has markers ({}, {}), expected {}",
                    index, leading_marker, trailing_marker, expected_marker
                ),
            ));
        }
        B::read_f32_into(
            &record[RECORD_MARKER_SIZE..RECORD_MARKER_SIZE + payload_size],
            payload,
        );
    }
    Ok(values)
}
