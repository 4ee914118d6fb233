#[cfg(test)]
mod tests {
    use super::super::adm1_model::Adm1Model;
    use super::super::anaerobic_digester::AnaerobicDigester;
    use super::super::h2_solver::{HydrogenSolver, hydrogen_balance};
    use super::super::indices::*;
    use super::super::inhibition::{PhInhibition, PhInhibitionModel, PhWindow};
    use super::super::integrator::RungeKutta4;
    use super::super::kinetics::{InhibitionFactors, process_rates};
    use super::super::parameters::{
        DigesterParameters, InfluentVector, InitialState, ReactorVolumes, StateVector,
    };
    use super::super::ph_solver::{AcidBaseTotals, IonState, PhSolver, charge_balance};
    use super::super::thermo::{AcidBaseConstants, GasPhaseConstants};
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn at_base_temperature() -> DigesterParameters {
        let mut p = DigesterParameters::default();
        p.set_operating_temperature(p.t_base);
        p
    }

    fn bsm2_feed(x: &StateVector) -> InfluentVector {
        let mut u = InfluentVector::zeros();
        for i in 0..=S_AN {
            u[i] = x[i];
        }
        u[U_Q] = 178.4674;
        u[U_T] = 35.0;
        u
    }

    #[test]
    fn neutral_equilibrium_at_25_degrees() {
        let p = at_base_temperature();
        let k = AcidBaseConstants::from_parameters(&p);
        let mut x = StateVector::zeros();
        x[S_CAT] = 0.02;
        x[S_AN] = 0.02;
        let mut solver = PhSolver::new(IonState::from_state(1e-9, &x));
        solver.update(&k, &x);
        assert_relative_eq!(solver.ions.s_h, k.k_w.sqrt(), max_relative = 1e-9);
        assert_abs_diff_eq!(solver.ions.ph(), 7.0, epsilon = 1e-9);
    }

    #[test]
    fn acidification_with_acetate_only() {
        let k = AcidBaseConstants::from_parameters(&at_base_temperature());
        let mut x = StateVector::zeros();
        x[S_AC] = 0.1;
        let mut solver = PhSolver::new(IonState::from_state(1e-7, &x));
        solver.update(&k, &x);
        assert!(solver.ions.ph() < 4.0);
        let f = charge_balance(&k, &AcidBaseTotals::from_state(&x), solver.ions.s_h);
        assert!(f.abs() < 1e-8);
        for value in solver.ions.to_array() {
            assert!(value >= 0.0);
        }
    }

    #[test]
    fn inhibition_is_one_half_at_window_midpoint() {
        let model = PhInhibition::default();
        let mut width = 0.5;
        while width <= 3.0 + 1e-12 {
            let window = PhWindow::new(5.5, 5.5 - width);
            let s_h = 10f64.powf(-window.midpoint());
            assert_relative_eq!(model.inhibition(s_h, window), 0.5, epsilon = 1e-12);
            width += 0.25;
        }
    }

    #[test]
    fn temperature_correction_vanishes_at_base_temperature() {
        let p = at_base_temperature();
        let k = AcidBaseConstants::from_parameters(&p);
        let gas = GasPhaseConstants::from_parameters(&p);
        assert_relative_eq!(k.k_w, 10f64.powf(-p.pk_w_base), max_relative = 1e-14);
        assert_relative_eq!(k.k_a_co2, 10f64.powf(-p.pk_a_co2_base), max_relative = 1e-14);
        assert_relative_eq!(k.k_a_in, 10f64.powf(-p.pk_a_in_base), max_relative = 1e-14);
        assert_eq!(gas.k_h_h2, p.k_h_h2_base);
        assert_eq!(gas.k_h_ch4, p.k_h_ch4_base);
        assert_eq!(gas.k_h_co2, p.k_h_co2_base);
    }

    /// Closed reactor below atmospheric head-space pressure: methane leaving the liquid
    /// shows up in the gas phase one to one.
    #[test]
    fn methane_is_conserved_between_liquid_and_gas() {
        let mut digester = AnaerobicDigester::bsm2().unwrap();
        let u = InfluentVector::zeros();
        digester.update_algebraic(&u);
        let mut x = *digester.state();
        x[S_GAS_H2] = 0.0;
        x[S_GAS_CH4] = 0.3;
        x[S_GAS_CO2] = 0.005;
        let model = digester.model();
        assert_eq!(model.head_space(&x).q_gas, 0.0);

        let dx = digester.rhs(0.0, &x, &u);
        let algebraic = digester.algebraic();
        let p = model.params();
        let inhib = InhibitionFactors::evaluate(
            p,
            model.ph_inhibition(),
            algebraic.ions.s_h,
            x[S_IN],
            algebraic.s_h2,
            algebraic.ions.s_nh3,
        )
        .products();
        let rho = process_rates(p, &x, algebraic.s_h2, &inhib);
        let biological = model.stoichiometry().component_production(S_CH4, &rho);

        let v = model.volumes();
        let total = v.v_liq * dx[S_CH4] + v.v_gas * dx[S_GAS_CH4];
        assert_relative_eq!(total, v.v_liq * biological, max_relative = 1e-10);
    }

    #[test]
    fn dilution_is_linear_in_flow() {
        let digester = AnaerobicDigester::bsm2().unwrap();
        let x = *digester.state();
        let mut u = bsm2_feed(&x);
        u[S_SU] = 0.5;
        u[S_IN] = 0.2;
        let derivative = |q: f64| {
            let mut uq = u;
            uq[U_Q] = q;
            digester.rhs(0.0, &x, &uq)
        };
        let d0 = derivative(0.0);
        let d1 = derivative(100.0);
        let d2 = derivative(200.0);
        for i in [S_SU, S_IN, S_CAT, X_I] {
            assert_relative_eq!(d2[i] - d0[i], 2.0 * (d1[i] - d0[i]), max_relative = 1e-9);
            assert_relative_eq!(
                d1[i] - d0[i],
                100.0 / v_liq(&digester) * (u[i] - x[i]),
                max_relative = 1e-9
            );
        }
    }

    fn v_liq(digester: &AnaerobicDigester) -> f64 {
        digester.model().volumes().v_liq
    }

    #[test]
    fn low_ph_raises_dissolved_hydrogen() {
        let model = Adm1Model::default();
        let init = InitialState::bsm2();
        let x = init.state_vector().unwrap();
        let u = bsm2_feed(&x);
        let mut ions = IonState::from_state(1e-7, &x);

        let mut neutral = HydrogenSolver::new(x[S_H2]);
        neutral.update(&model, &x, &u, &ions);
        ions.s_h = 10f64.powf(-model.params().ph_ll_h2);
        let mut acidic = HydrogenSolver::new(x[S_H2]);
        acidic.update(&model, &x, &u, &ions);

        let (g, _) = hydrogen_balance(&model, &x, &u, &ions, acidic.s_h2);
        assert!(g.abs() < 1e-8);
        assert!(acidic.s_h2 >= 10.0 * neutral.s_h2);
    }

    #[test]
    fn ten_day_run_keeps_algebraic_states_positive_and_balanced() {
        let mut digester = AnaerobicDigester::bsm2().unwrap();
        let u = bsm2_feed(digester.state());
        // head-space CO2 relaxes at ~1600 1/d; keep the substep below 1.5e-3 d
        let mut rk4 = RungeKutta4 { substeps: 50 };
        let mut t = 0.0;
        while t < 10.0 - 1e-9 {
            digester.major_step(&mut rk4, 0.05, &u);
            t += 0.05;
            for value in digester.ions().to_array() {
                assert!(value > 0.0);
            }
            assert!(digester.s_h2() > 0.0);
        }
        let x = *digester.state();
        let f = charge_balance(
            digester.model().acid_base(),
            &AcidBaseTotals::from_state(&x),
            digester.ions().s_h,
        );
        assert!(f.abs() < 1e-8);
        let (g, _) = hydrogen_balance(digester.model(), &x, &u, digester.ions(), digester.s_h2());
        assert!(g.abs() < 1e-8);
    }

    #[test]
    fn parameter_slices_of_wrong_length_are_rejected() {
        let params = DigesterParameters::default().to_vec();
        assert!(Adm1Model::from_slices(&params, &[3400.0, 300.0]).is_ok());
        assert!(Adm1Model::from_slices(&params[..99], &[3400.0, 300.0]).is_err());
        assert!(Adm1Model::from_slices(&params, &[3400.0]).is_err());
        assert!(ReactorVolumes::new(-1.0, 300.0).is_err());
    }
}
