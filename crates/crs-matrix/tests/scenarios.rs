//! End-to-end scenarios for insertion, compression, addition and the text dump

use crs_matrix::{CrsError, CrsMatrix, ShapeMismatchError};

/// Values in these scenarios are chosen so 1e-3 separates every distinct result
fn close(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-3
}

fn read_row(m: &CrsMatrix<f32>, row: usize) -> (Vec<usize>, Vec<f32>) {
    let mut cols = [0usize; 6];
    let mut vals = [0.0f32; 6];
    let n = m.row_entries(row, &mut cols, &mut vals).unwrap();
    (cols[..n].to_vec(), vals[..n].to_vec())
}

fn assert_row(m: &CrsMatrix<f32>, row: usize, cols: &[usize], vals: &[f32]) {
    let (got_cols, got_vals) = read_row(m, row);
    assert_eq!(got_cols, cols, "columns of row {}", row);
    assert_eq!(got_vals.len(), vals.len(), "length of row {}", row);
    for (got, want) in got_vals.iter().zip(vals) {
        assert!(close(*got, *want), "row {}: got {}, want {}", row, got, want);
    }
}

fn insertion_matrix() -> CrsMatrix<f32> {
    let mut m = CrsMatrix::new(10, 10);
    m.insert_at_row(0, &[1, 4], &[4.1, 2.0]).unwrap();
    m.insert_at_row(4, &[1, 4], &[4.1, 2.0]).unwrap();
    m.insert_at_row(4, &[2, 0], &[3.1, 1.7]).unwrap();
    m.insert_at_row(4, &[2, 0], &[3.1, 1.7]).unwrap();
    m
}

#[test]
fn test_initialization_dump() {
    let m = CrsMatrix::<f32>::new(10, 10);
    let mut out = Vec::new();
    m.dump(&mut out).unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "INFORMATION\n------------------\nNumber of Rows: 10\nNumber of Columns: 10\nNumber of Non-Zeros: 0\nVALUES\n------------------\n"
    );
    assert_eq!(m.nnz(), 0);
    assert!(m.row_ptr().iter().all(|&p| p == 0));
}

#[test]
fn test_insertion_before_compression() {
    let m = insertion_matrix();
    for row in 0..10 {
        match row {
            0 => assert_row(&m, 0, &[1, 4], &[4.1, 2.0]),
            4 => assert_row(
                &m,
                4,
                &[1, 4, 2, 0, 2, 0],
                &[4.1, 2.0, 3.1, 1.7, 3.1, 1.7],
            ),
            _ => assert_row(&m, row, &[], &[]),
        }
    }
}

#[test]
fn test_insertion_after_compression() {
    let mut m = insertion_matrix();
    m.compress().unwrap();
    assert_eq!(m.nnz(), 6);
    for row in 0..10 {
        match row {
            0 => assert_row(&m, 0, &[1, 4], &[4.1, 2.0]),
            4 => assert_row(&m, 4, &[0, 1, 2, 4], &[3.4, 4.1, 6.2, 2.0]),
            _ => assert_row(&m, row, &[], &[]),
        }
    }
}

#[test]
fn test_compressed_dump() {
    let mut m = insertion_matrix();
    m.compress().unwrap();
    assert_eq!(
        m.to_string(),
        "INFORMATION\n------------------\n\
         Number of Rows: 10\nNumber of Columns: 10\nNumber of Non-Zeros: 6\n\
         VALUES\n------------------\n\
         Row: 0 Col: 1 Value 4.1\n\
         Row: 0 Col: 4 Value 2\n\
         Row: 4 Col: 0 Value 3.4\n\
         Row: 4 Col: 1 Value 4.1\n\
         Row: 4 Col: 2 Value 6.2\n\
         Row: 4 Col: 4 Value 2\n"
    );
}

#[test]
fn test_add() {
    let mut a = CrsMatrix::<f32>::new(10, 10);
    let mut b = CrsMatrix::<f32>::new(10, 10);
    let mut c = CrsMatrix::<f32>::new(10, 10);

    // Row 0: only in A
    a.insert_at_row(0, &[1, 4], &[4.1, 2.0]).unwrap();
    // Row 1: same entries in both
    a.insert_at_row(1, &[1, 4], &[4.1, 2.0]).unwrap();
    b.insert_at_row(1, &[1, 4], &[4.1, 2.0]).unwrap();
    // Row 2: no shared columns
    b.insert_at_row(2, &[1, 4], &[4.1, 2.0]).unwrap();
    a.insert_at_row(2, &[0, 2], &[4.1, 2.0]).unwrap();
    // Row 3: one shared column
    a.insert_at_row(3, &[0, 2], &[4.1, 2.0]).unwrap();
    b.insert_at_row(3, &[3, 2], &[4.1, 2.0]).unwrap();

    a.compress().unwrap();
    b.compress().unwrap();

    // 3*A + 2*B = C
    a.add(3.0, &b, 2.0, &mut c).unwrap();
    assert!(c.is_compressed());

    for row in 0..10 {
        match row {
            0 => assert_row(&c, 0, &[1, 4], &[12.3, 6.0]),
            1 => assert_row(&c, 1, &[1, 4], &[20.5, 10.0]),
            2 => assert_row(&c, 2, &[0, 1, 2, 4], &[12.3, 8.2, 6.0, 4.0]),
            3 => assert_row(&c, 3, &[0, 2, 3], &[12.3, 10.0, 8.2]),
            _ => assert_row(&c, row, &[], &[]),
        }
    }
}

#[test]
fn test_error_taxonomy() {
    let mut m = insertion_matrix();

    assert_eq!(
        m.insert_at_row(10, &[0], &[1.0]),
        Err(CrsError::RowOutOfRange { row: 10, nrows: 10 })
    );

    let mut cols = [0usize; 2];
    let mut vals = [0.0f32; 2];
    assert_eq!(
        m.row_entries(4, &mut cols, &mut vals),
        Err(CrsError::BufferTooSmall {
            required: 6,
            capacity: 2
        })
    );
    assert_eq!(
        m.row_entries(11, &mut cols, &mut vals),
        Err(CrsError::RowOutOfRange { row: 11, nrows: 10 })
    );

    m.compress().unwrap();
    assert_eq!(m.compress(), Err(CrsError::AlreadyCompressed));

    let other = CrsMatrix::<f32>::new(10, 9);
    let mut c = CrsMatrix::<f32>::new(10, 10);
    assert_eq!(
        m.add(1.0, &other, 1.0, &mut c),
        Err(CrsError::ShapeMismatch(ShapeMismatchError::Cols { a: 10, b: 9 }))
    );
}

#[test]
fn test_unvalidated_columns_reach_dump() {
    let mut m = CrsMatrix::<f32>::new(2, 2);
    m.insert_at_row(0, &[5], &[1.5]).unwrap();
    assert_row(&m, 0, &[5], &[1.5]);
    assert!(m.to_string().ends_with("Row: 0 Col: 5 Value 1.5\n"));
}
