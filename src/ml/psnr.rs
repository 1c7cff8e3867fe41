// ============================================================
// PSNR Metric
// ============================================================
// Peak Signal-to-Noise Ratio over images scaled to [0, 1]:
//
//   PSNR = 20 * log10(MAXp) - 10 * log10(MSE)
//
// With MAXp = 1 the first term is zero, leaving
//
//   PSNR = -10 * log10(mean((y_pred - y_true)^2))
//
// Two forms are provided: `psnr` over plain ndarray data (used for
// reporting and tests) and `psnr_loss` over burn tensors (used as
// the training metric inside the graph). They must agree within
// floating-point tolerance on the same data.

use burn::prelude::*;
use ndarray::{ArrayBase, Data, Dimension};

/// PSNR in decibels over plain arrays.
///
/// Zero error gives `f64::INFINITY`, never a divide-by-zero.
///
/// # Panics
/// Panics if the two arrays have different shapes; the message
/// carries both shapes.
pub fn psnr<S, D>(y_true: &ArrayBase<S, D>, y_pred: &ArrayBase<S, D>) -> f64
where
    S: Data<Elem = f32>,
    D: Dimension,
{
    assert!(
        y_true.shape() == y_pred.shape(),
        "cannot calculate PSNR: input shapes not same. y_true shape = {:?}, y_pred shape = {:?}",
        y_true.shape(),
        y_pred.shape(),
    );

    let n = y_true.len() as f64;
    let mse: f64 = y_true
        .iter()
        .zip(y_pred.iter())
        .map(|(&t, &p)| {
            let d = f64::from(p) - f64::from(t);
            d * d
        })
        .sum::<f64>()
        / n;

    if mse == 0.0 {
        f64::INFINITY
    } else {
        -10.0 * mse.log10()
    }
}

/// PSNR as a tensor expression: `-10 * ln(mean((y_pred - y_true)^2)) / ln(10)`.
///
/// Stays inside the framework graph so it can ride along with the
/// training step. Identical inputs produce `+inf` through `ln(0)`.
pub fn psnr_loss<B: Backend, const D: usize>(
    y_true: Tensor<B, D>,
    y_pred: Tensor<B, D>,
) -> Tensor<B, 1> {
    (y_pred - y_true)
        .powf_scalar(2.0)
        .mean()
        .log()
        .mul_scalar(-10.0 / std::f32::consts::LN_10)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::ml::InferBackend;
    use ndarray::{arr1, Array3};

    #[test]
    fn test_identical_inputs_give_positive_infinity() {
        let a = Array3::<f32>::from_elem((4, 4, 3), 0.25);
        let value = psnr(&a, &a);
        assert!(value.is_infinite() && value > 0.0);
    }

    #[test]
    fn test_known_value() {
        // Constant error of 0.5 → MSE 0.25 → -10*log10(0.25) ≈ 6.0206
        let t = arr1(&[0.0f32, 0.0, 0.0, 0.0]);
        let p = arr1(&[0.5f32, 0.5, 0.5, 0.5]);
        assert!((psnr(&t, &p) - 6.020_599_913).abs() < 1e-6);
    }

    #[test]
    #[should_panic(expected = "input shapes not same")]
    fn test_shape_mismatch_panics_with_shapes() {
        let t = arr1(&[0.0f32, 0.0]);
        let p = arr1(&[0.0f32, 0.0, 0.0]);
        let _ = psnr(&t, &p);
    }

    #[test]
    fn test_tensor_form_is_infinite_at_zero_error() {
        let device = Default::default();
        let a = Tensor::<InferBackend, 1>::from_floats([0.3, 0.7, 0.1], &device);
        let value: f64 = psnr_loss(a.clone(), a).into_scalar().elem();
        assert!(value.is_infinite() && value > 0.0);
    }

    #[test]
    fn test_array_and_tensor_forms_agree() {
        let t = arr1(&[0.10f32, 0.55, 0.90, 0.25, 0.40, 0.75]);
        let p = arr1(&[0.12f32, 0.50, 0.95, 0.20, 0.42, 0.80]);

        let plain = psnr(&t, &p);

        let device = Default::default();
        let tt = Tensor::<InferBackend, 1>::from_floats(
            t.as_slice().unwrap(),
            &device,
        );
        let tp = Tensor::<InferBackend, 1>::from_floats(
            p.as_slice().unwrap(),
            &device,
        );
        let tensor: f64 = psnr_loss(tt, tp).into_scalar().elem();

        assert!(
            (plain - tensor).abs() < 1e-3,
            "plain = {plain}, tensor = {tensor}"
        );
    }
}
