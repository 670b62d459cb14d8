use cdma_types::{CdmaError, CdmaResult};

/// Build the `n × n` Sylvester-Hadamard matrix, row-major.
///
/// `n` must be a power of two (so `n = 0` is rejected). The result is a pure
/// function of `n`.
pub fn generate(n: usize) -> CdmaResult<Vec<i8>> {
    if !n.is_power_of_two() {
        return Err(CdmaError::InvalidCodeLength { n });
    }
    let cells = n
        .checked_mul(n)
        .ok_or(CdmaError::OutOfMemory { what: "walsh code matrix" })?;

    let mut matrix = Vec::new();
    matrix
        .try_reserve_exact(cells)
        .map_err(CdmaError::alloc("walsh code matrix"))?;
    matrix.resize(cells, 0);

    let order = n.trailing_zeros();
    fill(&mut matrix, n, Quadrant { x: 0, y: 0, size: n }, order, 1);
    Ok(matrix)
}

#[derive(Clone, Copy)]
struct Quadrant {
    x: usize,
    y: usize,
    size: usize,
}

/// Write `sign × H(2^order)` into `quadrant` of a row-major matrix of width
/// `stride`.
fn fill(matrix: &mut [i8], stride: usize, q: Quadrant, order: u32, sign: i8) {
    let at = |row: usize, col: usize| (q.y + row) * stride + q.x + col;
    match order {
        0 => matrix[at(0, 0)] = sign,
        1 => {
            matrix[at(0, 0)] = sign;
            matrix[at(0, 1)] = sign;
            matrix[at(1, 0)] = sign;
            matrix[at(1, 1)] = -sign;
        }
        _ => {
            let half = q.size / 2;
            let sub = |x, y| Quadrant { x, y, size: half };
            fill(matrix, stride, sub(q.x, q.y), order - 1, sign);
            fill(matrix, stride, sub(q.x + half, q.y), order - 1, sign);
            fill(matrix, stride, sub(q.x, q.y + half), order - 1, sign);
            fill(matrix, stride, sub(q.x + half, q.y + half), order - 1, -sign);
        }
    }
}
