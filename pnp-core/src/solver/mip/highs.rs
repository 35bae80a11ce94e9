#[cfg(test)]
#[path = "../../../tests/unit/solver/mip/highs_test.rs"]
mod highs_test;

use crate::solver::mip::{
    ConstraintSense, MipModel, MipSolution, MipSolver, SolverOptions, SolverStatus, VarId,
};
use crate::{Error, Result};
use good_lp::solvers::highs::highs;
use good_lp::{
    constraint, variable, variables, Expression, ResolutionError, Solution, SolverModel, Variable,
    WithMipGap,
};

/// Solves models with the HiGHS branch-and-cut engine.
///
/// Presolve and symmetry detection are enabled by HiGHS defaults, and the
/// thread count is left at its default of 0 (auto, all cores).
#[derive(Default)]
pub struct HighsSolver {}

impl MipSolver for HighsSolver {
    fn solve(&self, model: &MipModel, options: &SolverOptions) -> Result<MipSolution> {
        let mut vars = variables!();
        let handles = (0..model.binary_count())
            .map(|idx| vars.add(variable().binary().name(format!("x{idx}"))))
            .collect::<Vec<_>>();

        let objective = linear_expression(handles.as_slice(), model.objective());

        let mut problem = vars
            .minimise(objective)
            .using(highs)
            .with_mip_gap(options.mip_gap as f32)
            .map_err(|err| Error::SolverUnknown { condition: err.to_string() })?;
        if let Some(limit) = options.time_limit {
            problem = problem.set_time_limit(limit);
        }

        for item in model.constraints() {
            let lhs = linear_expression(handles.as_slice(), item.terms.as_slice());
            problem = match item.sense {
                ConstraintSense::Equal => problem.with(constraint!(lhs == item.rhs)),
                ConstraintSense::LessOrEqual => problem.with(constraint!(lhs <= item.rhs)),
                ConstraintSense::GreaterOrEqual => problem.with(constraint!(lhs >= item.rhs)),
            };
        }

        match problem.solve() {
            Ok(solution) => {
                let values =
                    handles.iter().map(|&handle| solution.value(handle)).collect::<Vec<_>>();
                let objective = model
                    .objective()
                    .iter()
                    .map(|&(var, coefficient)| values[var] * coefficient)
                    .sum();

                Ok(MipSolution { status: SolverStatus::Optimal, values, objective })
            }
            Err(ResolutionError::Infeasible) => {
                Ok(MipSolution { status: SolverStatus::Infeasible, values: vec![], objective: 0. })
            }
            Err(err) => Ok(MipSolution {
                status: SolverStatus::Other(err.to_string()),
                values: vec![],
                objective: 0.,
            }),
        }
    }
}

fn linear_expression(handles: &[Variable], terms: &[(VarId, f64)]) -> Expression {
    terms.iter().map(|&(var, coefficient)| handles[var] * coefficient).sum()
}
