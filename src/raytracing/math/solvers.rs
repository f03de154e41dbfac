//! Real roots of polynomials up to degree four.
//!
//! Every solver returns the real roots sorted ascending with near duplicates
//! merged. When the leading coefficient vanishes the polynomial is handed
//! down to the solver of the next lower degree. The cubic and the quartic
//! compare it against an absolute threshold, callers solving for ray
//! parameters pass a unit direction so it stays close to one.

use std::f64::consts::PI;

/// Below this magnitude a leading coefficient is treated as zero.
const DEGENERATE: f64 = 1e-12;
/// Roots closer than this are reported once.
const DUPLICATE: f64 = 1e-9;
const NEWTON_STEPS: usize = 3;

/// Solves `a*x + b = 0`.
pub fn solve_linear(a: f64, b: f64) -> Vec<f64> {
    if a.abs() < DEGENERATE {
        return Vec::new();
    }
    vec![-b / a]
}

/// Solves `a*x^2 + b*x + c = 0`.
///
/// Only an exact zero `a` drops to the linear case: the stable form below
/// stays accurate for a tiny but nonzero `a`.
pub fn solve_quadratic(a: f64, b: f64, c: f64) -> Vec<f64> {
    if a == 0.0 {
        return solve_linear(b, c);
    }
    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return Vec::new();
    }
    if discriminant == 0.0 {
        return vec![-b / (2.0 * a)];
    }
    // avoid the cancellation of -b + sqrt(d) when b is large
    let q = -0.5 * (b + b.signum() * discriminant.sqrt());
    let mut roots = if q == 0.0 {
        // b == 0 and c == 0
        vec![0.0]
    } else {
        vec![q / a, c / q]
    };
    finish(&mut roots);
    roots
}

/// Solves `a*x^3 + b*x^2 + c*x + d = 0` with Cardano's formula, or the
/// trigonometric form when there are three real roots.
pub fn solve_cubic(a: f64, b: f64, c: f64, d: f64) -> Vec<f64> {
    if a.abs() < DEGENERATE {
        return solve_quadratic(b, c, d);
    }
    let (b, c, d) = (b / a, c / a, d / a);

    // depressed cubic y^3 + p*y + q = 0 with x = y - b/3
    let shift = b / 3.0;
    let p = c - b * b / 3.0;
    let q = 2.0 * b * b * b / 27.0 - b * c / 3.0 + d;

    let half_q = q / 2.0;
    let third_p = p / 3.0;
    let discriminant = half_q * half_q + third_p * third_p * third_p;

    let mut roots = if p.abs() < DEGENERATE && q.abs() < DEGENERATE {
        vec![0.0]
    } else if discriminant > DEGENERATE {
        let sqrt_d = discriminant.sqrt();
        vec![(-half_q + sqrt_d).cbrt() + (-half_q - sqrt_d).cbrt()]
    } else if discriminant >= -DEGENERATE {
        // a simple root and a double one
        let u = (-half_q).cbrt();
        vec![2.0 * u, -u]
    } else {
        let r = (-third_p).sqrt();
        let cos_phi = (-half_q / (r * r * r)).clamp(-1.0, 1.0);
        let phi = cos_phi.acos();
        (0..3)
            .map(|k| 2.0 * r * ((phi + 2.0 * PI * k as f64) / 3.0).cos())
            .collect()
    };

    for root in roots.iter_mut() {
        *root -= shift;
    }
    let coefficients = [1.0, b, c, d];
    polish(&mut roots, &coefficients);
    finish(&mut roots);
    roots
}

/// Solves `a*x^4 + b*x^3 + c*x^2 + d*x + e = 0` with Ferrari's method.
pub fn solve_quartic(a: f64, b: f64, c: f64, d: f64, e: f64) -> Vec<f64> {
    if a.abs() < DEGENERATE {
        return solve_cubic(b, c, d, e);
    }
    let (b, c, d, e) = (b / a, c / a, d / a, e / a);

    // depressed quartic y^4 + p*y^2 + q*y + r = 0 with x = y - b/4
    let shift = b / 4.0;
    let b2 = b * b;
    let p = c - 3.0 * b2 / 8.0;
    let q = d - b * c / 2.0 + b2 * b / 8.0;
    let r = e - b * d / 4.0 + b2 * c / 16.0 - 3.0 * b2 * b2 / 256.0;

    let mut roots = Vec::with_capacity(4);
    if q.abs() < DEGENERATE {
        // biquadratic: z = y^2
        for z in solve_quadratic(1.0, p, r) {
            if z >= 0.0 {
                let y = z.sqrt();
                roots.push(y);
                roots.push(-y);
            }
        }
    } else {
        // any positive root m of the resolvent turns the depressed quartic
        // into a difference of squares; q != 0 guarantees one exists
        let resolvent = solve_cubic(8.0, 8.0 * p, 2.0 * p * p - 8.0 * r, -q * q);
        let m = match resolvent.last() {
            Some(&m) if m > 0.0 => m,
            _ => return Vec::new(),
        };
        let s = (2.0 * m).sqrt();
        let half_p_m = p / 2.0 + m;
        let q_s = q / (2.0 * s);
        roots.extend(solve_quadratic(1.0, -s, half_p_m + q_s));
        roots.extend(solve_quadratic(1.0, s, half_p_m - q_s));
    }

    for root in roots.iter_mut() {
        *root -= shift;
    }
    let coefficients = [1.0, b, c, d, e];
    polish(&mut roots, &coefficients);
    finish(&mut roots);
    roots
}

/// Evaluates the polynomial and its derivative, coefficients highest degree
/// first.
fn evaluate(coefficients: &[f64], x: f64) -> (f64, f64) {
    let mut value = 0.0;
    let mut derivative = 0.0;
    for &coefficient in coefficients {
        derivative = derivative * x + value;
        value = value * x + coefficient;
    }
    (value, derivative)
}

/// A few Newton steps on the original polynomial recover the precision lost
/// in the closed form.
fn polish(roots: &mut [f64], coefficients: &[f64]) {
    for root in roots.iter_mut() {
        for _ in 0..NEWTON_STEPS {
            let (value, derivative) = evaluate(coefficients, *root);
            if derivative == 0.0 {
                break;
            }
            let next = *root - value / derivative;
            if !next.is_finite() {
                break;
            }
            // keep the step only if it improves the residual
            if evaluate(coefficients, next).0.abs() > value.abs() {
                break;
            }
            *root = next;
        }
    }
}

fn finish(roots: &mut Vec<f64>) {
    roots.retain(|root| root.is_finite());
    roots.sort_by(|a, b| a.total_cmp(b));
    roots.dedup_by(|a, b| (*a - *b).abs() < DUPLICATE);
}
