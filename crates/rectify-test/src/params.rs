//! Regression test parameters and comparisons

use rectify_core::Raster;

/// Regression test state
///
/// Tracks a test's name, a running comparison index, and the overall
/// success status, so one test function can chain many checks and report
/// them all before failing.
pub struct RegParams {
    /// Name of the test (e.g., "homography")
    pub test_name: String,
    /// Current comparison index (incremented before each comparison)
    index: usize,
    /// Overall success status
    success: bool,
    /// Recorded failures
    failures: Vec<String>,
}

impl RegParams {
    /// Create new regression test parameters.
    pub fn new(test_name: &str) -> Self {
        eprintln!();
        eprintln!("////////////////////////////////////////////////");
        eprintln!("////////////////   {}_reg   ///////////////", test_name);
        eprintln!("////////////////////////////////////////////////");

        Self {
            test_name: test_name.to_string(),
            index: 0,
            success: true,
            failures: Vec::new(),
        }
    }

    /// Get the current comparison index.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Compare two floating-point values.
    ///
    /// # Arguments
    ///
    /// * `expected` - Expected value
    /// * `actual` - Actual computed value
    /// * `delta` - Maximum allowed difference
    ///
    /// # Returns
    ///
    /// `true` if values match within delta.
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        self.index += 1;
        let diff = (expected - actual).abs();

        if diff > delta {
            let msg = format!(
                "Failure in {}_reg: value comparison for index {}\n\
                 difference = {} but allowed delta = {}\n\
                 expected = {}, actual = {}",
                self.test_name, self.index, diff, delta, expected, actual
            );
            eprintln!("{}", msg);
            self.failures.push(msg);
            self.success = false;
            false
        } else {
            true
        }
    }

    /// Compare two rasters for exact equality (dimensions and every byte).
    pub fn compare_rasters(&mut self, a: &Raster, b: &Raster) -> bool {
        self.index += 1;

        if !a.sizes_equal(b) {
            let msg = format!(
                "Failure in {}_reg: raster comparison for index {} - \
                 dimension mismatch: {}x{} vs {}x{}",
                self.test_name,
                self.index,
                a.width(),
                a.height(),
                b.width(),
                b.height()
            );
            eprintln!("{}", msg);
            self.failures.push(msg);
            self.success = false;
            return false;
        }

        if a.data() != b.data() {
            let first_diff = a
                .data()
                .iter()
                .zip(b.data())
                .position(|(x, y)| x != y)
                .unwrap_or(0);
            let px = first_diff / rectify_core::BYTES_PER_PIXEL;
            let msg = format!(
                "Failure in {}_reg: raster comparison for index {} - \
                 pixel mismatch at ({}, {})",
                self.test_name,
                self.index,
                px % a.width() as usize,
                px / a.width() as usize
            );
            eprintln!("{}", msg);
            self.failures.push(msg);
            self.success = false;
            return false;
        }

        true
    }

    /// Report results.
    ///
    /// # Returns
    ///
    /// `true` if all comparisons passed.
    pub fn cleanup(self) -> bool {
        if self.success {
            eprintln!("SUCCESS: {}_reg", self.test_name);
        } else {
            eprintln!("FAILURE: {}_reg", self.test_name);
            for failure in &self.failures {
                eprintln!("  {}", failure);
            }
        }
        eprintln!();

        self.success
    }

    /// Check if all comparisons have passed so far.
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Get the list of failures.
    pub fn failures(&self) -> &[String] {
        &self.failures
    }
}
