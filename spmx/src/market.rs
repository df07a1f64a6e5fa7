//! Matrix Market coordinate text I/O
//!
//! Reads and writes the `coordinate` flavour of the Matrix Market exchange
//! format. Text indices are 1-based; logical `(row, column)` pairs are
//! mapped to storage coordinates through the matrix's ordering, so a
//! column-major load keys its entries `(column, row)`.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use spmx_core::format::constants::market::{BANNER_PREFIX, COMMENT, FORMAT, OBJECT, SYMMETRY};
use spmx_core::{
    parse_entry_line, parse_size_line, validate_coordinate, validate_dimensions, MatrixElement,
    ParseError, SpmxError, StorageOrder,
};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::matrix::Matrix;

/// Load a matrix from a Matrix Market file
///
/// With the `mmap` feature the file is memory-mapped rather than read into
/// a buffer. The result is uncompressed.
pub fn load<T, O, P>(path: P) -> Result<Matrix<T, O>>
where
    T: MatrixElement,
    O: StorageOrder,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path)?;

    if file.metadata()?.len() == 0 {
        return Err(Error::MissingSizeLine);
    }

    let matrix = read_text(&file)?;

    debug!(
        path = %path.display(),
        rows = matrix.rows(),
        columns = matrix.columns(),
        nnz = matrix.nnz(),
        "loaded matrix market file"
    );

    Ok(matrix)
}

#[cfg(feature = "mmap")]
fn read_text<T: MatrixElement, O: StorageOrder>(file: &File) -> Result<Matrix<T, O>> {
    // SAFETY: read-only mapping, dropped before this function returns
    let mmap = unsafe { memmap2::MmapOptions::new().map(file)? };
    parse(std::str::from_utf8(&mmap)?)
}

#[cfg(not(feature = "mmap"))]
fn read_text<T: MatrixElement, O: StorageOrder>(mut file: &File) -> Result<Matrix<T, O>> {
    use std::io::Read;

    let mut text = String::new();
    file.read_to_string(&mut text)?;
    parse(&text)
}

/// Parse Matrix Market text already in memory
///
/// Blank lines and lines starting with `%` (including the banner) are
/// skipped. The first remaining line is the size line.
pub fn parse<T: MatrixElement, O: StorageOrder>(text: &str) -> Result<Matrix<T, O>> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with(COMMENT));

    let (number, size_line) = lines.next().ok_or(Error::MissingSizeLine)?;
    let (rows, columns, declared) =
        parse_size_line(size_line).map_err(|reason| line_error(number, reason))?;

    let (first, second) = O::to_storage(rows, columns);
    validate_dimensions(first, second)?;

    let mut elements = BTreeMap::new();
    let mut read = 0;
    for (number, line) in lines {
        let (row, column, value) =
            parse_entry_line(line).map_err(|reason| line_error(number, reason))?;
        let (primary, secondary) = O::to_storage(row, column);
        validate_coordinate(primary, secondary, first, second)?;
        let value = T::from_f64_exact(value)
            .ok_or_else(|| line_error(number, ParseError::InexactValue))?;

        elements.insert((primary, secondary), value);
        read += 1;
    }

    if read != declared {
        warn!(declared, read, "entry count differs from size line");
    }

    let mut matrix = Matrix::new(first, second)?;
    matrix.insert_many(elements)?;
    Ok(matrix)
}

fn line_error(line: usize, reason: ParseError) -> Error {
    match reason {
        ParseError::ZeroIndex => Error::Matrix(SpmxError::OutOfBounds),
        reason => Error::Parse { line, reason },
    }
}

/// Write a matrix as Matrix Market text
///
/// Entries are written in storage order, as 1-based `(row, column)`. Works
/// in either storage mode.
pub fn write<T, O, W>(matrix: &Matrix<T, O>, mut writer: W) -> Result<()>
where
    T: MatrixElement,
    O: StorageOrder,
    W: Write,
{
    writeln!(
        writer,
        "{BANNER_PREFIX} {OBJECT} {FORMAT} {} {SYMMETRY}",
        T::data_type().market_field()
    )?;
    writeln!(
        writer,
        "{} {} {}",
        matrix.rows(),
        matrix.columns(),
        matrix.nnz()
    )?;

    for (primary, secondary, value) in matrix.entries() {
        let (row, column) = O::to_logical(primary, secondary);
        writeln!(writer, "{} {} {}", row + 1, column + 1, value)?;
    }

    Ok(())
}

/// Write a matrix to a Matrix Market file, replacing any existing file
pub fn dump<T, O, P>(matrix: &Matrix<T, O>, path: P) -> Result<()>
where
    T: MatrixElement,
    O: StorageOrder,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    write(matrix, &mut writer)?;
    writer.flush()?;

    debug!(
        path = %path.display(),
        format = %matrix.format(),
        nnz = matrix.nnz(),
        "dumped matrix market file"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use spmx_core::{ColumnMajor, RowMajor};

    const SAMPLE: &str = "\
%%MatrixMarket matrix coordinate real general
% a comment
3 4 3

1 1 4.0
2 4 -1.5
3 2 2.0
";

    #[test]
    fn test_parse_row_major() {
        let matrix: Matrix<f64, RowMajor> = parse(SAMPLE).unwrap();
        assert_eq!(matrix.shape(), (3, 4));
        assert_eq!(matrix.storage_shape(), (3, 4));
        assert!(!matrix.is_compressed());
        assert_eq!(
            matrix.entries().collect::<Vec<_>>(),
            vec![(0, 0, 4.0), (1, 3, -1.5), (2, 1, 2.0)]
        );
    }

    #[test]
    fn test_parse_column_major() {
        let matrix: Matrix<f64, ColumnMajor> = parse(SAMPLE).unwrap();
        assert_eq!(matrix.shape(), (3, 4));
        assert_eq!(matrix.storage_shape(), (4, 3));
        assert_eq!(matrix.get(3, 1), Ok(-1.5));
        assert_eq!(matrix.value(1, 3), Ok(-1.5));
    }

    #[test]
    fn test_parse_integers() {
        let matrix: Matrix<i32> = parse("2 2 1\n2 1 7\n").unwrap();
        assert_eq!(matrix.get(1, 0), Ok(7));
    }

    #[test]
    fn test_parse_rejects_lossy_integers() {
        assert!(matches!(
            parse::<i32, RowMajor>("2 2 2\n1 1 2.7\n2 2 0.4\n"),
            Err(Error::Parse {
                line: 2,
                reason: ParseError::InexactValue
            })
        ));
        assert!(matches!(
            parse::<u32, RowMajor>("1 1 1\n1 1 -3\n"),
            Err(Error::Parse {
                line: 2,
                reason: ParseError::InexactValue
            })
        ));
        assert!(matches!(
            parse::<i32, ColumnMajor>("1 1 1\n1 1 3000000000\n"),
            Err(Error::Parse {
                line: 2,
                reason: ParseError::InexactValue
            })
        ));

        // Integral text in real notation is fine
        let matrix: Matrix<u64> = parse("1 2 1\n1 2 5.0\n").unwrap();
        assert_eq!(matrix.get(0, 1), Ok(5));
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            parse::<f64, RowMajor>("%%MatrixMarket\n% only comments\n"),
            Err(Error::MissingSizeLine)
        ));

        assert!(matches!(
            parse::<f64, RowMajor>("%%MatrixMarket\n3 x 1\n"),
            Err(Error::Parse {
                line: 2,
                reason: ParseError::InvalidInteger
            })
        ));

        assert!(matches!(
            parse::<f64, RowMajor>("2 2 1\n1 1\n"),
            Err(Error::Parse {
                line: 2,
                reason: ParseError::MissingField
            })
        ));

        assert!(matches!(
            parse::<f64, RowMajor>("0 2 0\n"),
            Err(Error::Matrix(SpmxError::InvalidDimension))
        ));
    }

    #[test]
    fn test_parse_bad_indices() {
        assert!(matches!(
            parse::<f64, RowMajor>("2 2 1\n0 1 1.0\n"),
            Err(Error::Matrix(SpmxError::OutOfBounds))
        ));
        assert!(matches!(
            parse::<f64, ColumnMajor>("2 2 1\n1 3 1.0\n"),
            Err(Error::Matrix(SpmxError::OutOfBounds))
        ));
    }

    #[test]
    fn test_write_format() {
        let mut matrix: Matrix<f64, ColumnMajor> = parse(SAMPLE).unwrap();
        matrix.compress();

        let mut buffer = Vec::new();
        write(&matrix, &mut buffer).unwrap();

        // Column-major storage order walks columns first
        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "%%MatrixMarket matrix coordinate real general\n\
             3 4 3\n\
             1 1 4\n\
             3 2 2\n\
             2 4 -1.5\n"
        );
    }

    #[test]
    fn test_write_integer_field() {
        let matrix: Matrix<u32> = Matrix::from_triplets(1, 1, &[(0, 0, 9)]).unwrap();
        let mut buffer = Vec::new();
        write(&matrix, &mut buffer).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        assert!(text.starts_with("%%MatrixMarket matrix coordinate integer general\n"));
    }

    #[test]
    fn test_dump_and_load() {
        let directory = tempfile::tempdir().unwrap();
        let path = directory.path().join("sample.mtx");

        let original: Matrix<f64, RowMajor> = parse(SAMPLE).unwrap();
        dump(&original, &path).unwrap();

        let loaded: Matrix<f64, RowMajor> = load(&path).unwrap();
        assert_eq!(loaded, original);
    }

    #[test]
    fn test_load_missing_and_empty() {
        let directory = tempfile::tempdir().unwrap();

        let missing = directory.path().join("missing.mtx");
        assert!(matches!(
            load::<f64, RowMajor, _>(&missing),
            Err(Error::Io(_))
        ));

        let empty = directory.path().join("empty.mtx");
        File::create(&empty).unwrap();
        assert!(matches!(
            load::<f64, RowMajor, _>(&empty),
            Err(Error::MissingSizeLine)
        ));
    }
}
