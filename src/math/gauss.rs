//! Dense linear solver used by the polynomial estimator.
//!
//! The system `A·x = b` is passed as a column-major augmented matrix:
//!
//! ```text
//! matrix[k][i]  coefficient of unknown k in equation i   (k < n)
//! matrix[n][i]  right-hand side of equation i
//! ```
//!
//! where `n = matrix.len() - 1` is the number of unknowns.
//!
//! Pivoting is restricted: for pivot `i` only `matrix[i][i+1..n]` is scanned,
//! and the winner is swapped into place across columns `i..=n`. The solver does
//! not detect singular systems; a zero pivot produces NaN/inf in the output.

/// Solve the augmented system in place and return the `n` unknowns.
///
/// # Panics
/// Panics if any column is shorter than `n`. Callers build square systems.
pub fn gaussian_elimination(mut matrix: Vec<Vec<f64>>) -> Vec<f64> {
    let n = matrix.len().saturating_sub(1);

    for i in 0..n {
        let mut maxrow = i;
        for j in (i + 1)..n {
            if matrix[i][j].abs() > matrix[i][maxrow].abs() {
                maxrow = j;
            }
        }

        for column in &mut matrix[i..=n] {
            column.swap(i, maxrow);
        }

        for j in (i + 1)..n {
            // Descending `k` keeps `matrix[i][j]` intact until its own update.
            for k in (i..=n).rev() {
                let delta = matrix[k][i] * matrix[i][j] / matrix[i][i];
                matrix[k][j] -= delta;
            }
        }
    }

    let mut coefficients = vec![0.0; n];
    for j in (0..n).rev() {
        let mut total = 0.0;
        for k in (j + 1)..n {
            total += matrix[k][j] * coefficients[k];
        }
        coefficients[j] = (matrix[n][j] - total) / matrix[j][j];
    }

    coefficients
}
