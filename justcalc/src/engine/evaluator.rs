//! AST evaluator over `f64`

use crate::engine::parser::{AstNode, Operator};
use crate::engine::{CalcError, CalcResult};

/// The one function an expression may call.
pub const SQRT: &str = "sqrt";

/// Evaluates an AST node left to right
pub fn evaluate(node: &AstNode) -> CalcResult<f64> {
    match node {
        AstNode::Number(n) => check_result(*n),
        AstNode::Name(name) => Err(CalcError::UnknownName(name.clone())),
        AstNode::Negate(inner) => Ok(-evaluate(inner)?),
        AstNode::Binary { left, op, right } => {
            let a = evaluate(left)?;
            let b = evaluate(right)?;
            op.apply(a, b)
        }
        AstNode::Call { callee, arg } => call(callee, arg.as_deref()),
    }
}

fn call(callee: &AstNode, arg: Option<&AstNode>) -> CalcResult<f64> {
    match callee {
        AstNode::Name(name) if name == SQRT => match arg {
            Some(arg) => sqrt(evaluate(arg)?),
            None => Err(CalcError::NotCallable),
        },
        _ => {
            // the callee and its argument still run first, so `5/0(1)`
            // reports the division
            evaluate(callee)?;
            if let Some(arg) = arg {
                evaluate(arg)?;
            }
            Err(CalcError::NotCallable)
        }
    }
}

/// Square root that refuses negative input
pub fn sqrt(value: f64) -> CalcResult<f64> {
    if value < 0.0 {
        return Err(CalcError::Domain);
    }
    Ok(value.sqrt())
}

impl Operator {
    /// Applies the operator to two finite operands
    pub fn apply(self, a: f64, b: f64) -> CalcResult<f64> {
        let result = match self {
            Self::Add => a + b,
            Self::Subtract => a - b,
            Self::Multiply => a * b,
            Self::Divide => {
                non_zero(b)?;
                a / b
            }
            Self::FloorDivide => {
                non_zero(b)?;
                (a / b).floor()
            }
            Self::Modulo => {
                non_zero(b)?;
                floored_rem(a, b)
            }
            Self::Power => {
                if a == 0.0 && b < 0.0 {
                    return Err(CalcError::DivisionByZero);
                }
                a.powf(b)
            }
        };
        check_result(result)
    }
}

fn non_zero(divisor: f64) -> CalcResult<()> {
    if divisor == 0.0 {
        Err(CalcError::DivisionByZero)
    } else {
        Ok(())
    }
}

fn floored_rem(a: f64, b: f64) -> f64 {
    let r = a % b;
    if r != 0.0 && (r < 0.0) != (b < 0.0) {
        r + b
    } else {
        r
    }
}

/// NaN only comes out of a negative base with a fractional exponent.
fn check_result(result: f64) -> CalcResult<f64> {
    if result.is_nan() {
        Err(CalcError::Domain)
    } else if result.is_infinite() {
        Err(CalcError::Overflow)
    } else {
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::evaluate_str;

    #[test]
    fn test_evaluate_basic_arithmetic() {
        assert_eq!(evaluate_str("2 + 3"), Ok(5.0));
        assert_eq!(evaluate_str("5 - 3"), Ok(2.0));
        assert_eq!(evaluate_str("4 * 3"), Ok(12.0));
        assert_eq!(evaluate_str("12 / 4"), Ok(3.0));
        assert_eq!(evaluate_str("5 / 2"), Ok(2.5));
    }

    #[test]
    fn test_evaluate_power() {
        assert_eq!(evaluate_str("2^3"), Ok(8.0));
        assert_eq!(evaluate_str("2**3"), Ok(8.0));
        assert_eq!(evaluate_str("2^3^2"), Ok(512.0));
        assert_eq!(evaluate_str("-2^2"), Ok(-4.0));
        assert_eq!(evaluate_str("(-2)^2"), Ok(4.0));
        assert_eq!(evaluate_str("2^-1"), Ok(0.5));
    }

    #[test]
    fn test_evaluate_modulo_follows_divisor_sign() {
        assert_eq!(evaluate_str("7 % 3"), Ok(1.0));
        assert_eq!(evaluate_str("-7 % 3"), Ok(2.0));
        assert_eq!(evaluate_str("7 % -3"), Ok(-2.0));
        assert_eq!(evaluate_str("6 % 3"), Ok(0.0));
    }

    #[test]
    fn test_evaluate_floor_divide() {
        assert_eq!(evaluate_str("7 // 2"), Ok(3.0));
        assert_eq!(evaluate_str("-7 // 2"), Ok(-4.0));
    }

    #[test]
    fn test_evaluate_division_by_zero() {
        assert_eq!(evaluate_str("5/0"), Err(CalcError::DivisionByZero));
        assert_eq!(evaluate_str("5//0"), Err(CalcError::DivisionByZero));
        assert_eq!(evaluate_str("5%0"), Err(CalcError::DivisionByZero));
        assert_eq!(evaluate_str("0^-1"), Err(CalcError::DivisionByZero));
        assert_eq!(evaluate_str("1/(2-2)"), Err(CalcError::DivisionByZero));
    }

    #[test]
    fn test_evaluate_sqrt() {
        assert_eq!(evaluate_str("sqrt(16)"), Ok(4.0));
        assert_eq!(evaluate_str("√(9) + 1"), Ok(4.0));
        assert_eq!(evaluate_str("sqrt(-4)"), Err(CalcError::Domain));
        assert_eq!(evaluate_str("sqrt()"), Err(CalcError::NotCallable));
    }

    #[test]
    fn test_evaluate_domain_from_power() {
        assert_eq!(evaluate_str("(-8)^(1/3)"), Err(CalcError::Domain));
    }

    #[test]
    fn test_evaluate_overflow() {
        assert_eq!(evaluate_str("10^400"), Err(CalcError::Overflow));
        assert_eq!(evaluate_str("1e999"), Err(CalcError::Overflow));
    }

    #[test]
    fn test_evaluate_generic_failures() {
        assert_eq!(evaluate_str("2(3)"), Err(CalcError::NotCallable));
        assert_eq!(evaluate_str("sqrt(4)(2)"), Err(CalcError::NotCallable));
        assert_eq!(evaluate_str("pi"), Err(CalcError::UnknownName("pi".into())));
        assert_eq!(evaluate_str("sqrt"), Err(CalcError::UnknownName("sqrt".into())));
    }

    #[test]
    fn test_evaluation_order_is_left_to_right() {
        assert_eq!(evaluate_str("5/0 + 2(3)"), Err(CalcError::DivisionByZero));
        assert_eq!(evaluate_str("2(3) + 5/0"), Err(CalcError::NotCallable));
        assert_eq!(evaluate_str("(5/0)(1)"), Err(CalcError::DivisionByZero));
    }

    #[test]
    fn test_operator_apply() {
        assert_eq!(Operator::Add.apply(1.5, 2.5), Ok(4.0));
        assert_eq!(Operator::Divide.apply(1.0, 0.0), Err(CalcError::DivisionByZero));
        assert_eq!(Operator::Multiply.apply(f64::MAX, 2.0), Err(CalcError::Overflow));
    }
}
