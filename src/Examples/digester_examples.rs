use crate::Digester::anaerobic_digester::AnaerobicDigester;
use crate::Digester::indices::*;
use crate::Digester::integrator::{ExplicitEuler, Integrator, RungeKutta4};
use crate::Digester::observation::DigesterObservation;
use crate::Digester::parameters::InfluentVector;
use crate::Interfaces::adm2asm::adm2asm;
use crate::Interfaces::asm2adm::{adm_cod, asm2adm};
use crate::Interfaces::asm_state::*;
use crate::Interfaces::interface_parameters::{InterfaceParameters, PH_ADM_INIT};
use crate::Utils::load_from_file::{DigesterSetup, LoadData, save_digester_config};
use prettytable::{Table, row};

// thickened primary and secondary sludge entering the digester, g/m3
fn thickened_sludge() -> AsmVector {
    let mut y = AsmVector::zeros();
    y[SI] = 28.0643;
    y[SS] = 48.9533;
    y[XI] = 10362.0;
    y[XS] = 20375.0;
    y[XBH] = 10210.0;
    y[XBA] = 553.2881;
    y[XP] = 3204.7;
    y[SO] = 0.0;
    y[SNO] = 0.0;
    y[SNH] = 1.5733;
    y[SND] = 0.5962;
    y[XND] = 843.6935;
    y[SALK] = 4.6833;
    y[TSS] = 33383.0;
    y[Q] = 178.4674;
    y[TEMP] = 14.8581;
    y
}

fn trajectory_table(trajectory: &[(f64, DigesterObservation)], every: usize) {
    let mut table = Table::new();
    table.add_row(row!["t, d", "pH", "S_h2", "S_IN", "q_gas, m3/d", "p_gas_ch4, bar"]);
    for (t, obs) in trajectory.iter().step_by(every.max(1)) {
        table.add_row(row![
            format!("{:.2}", t),
            format!("{:.4}", obs.ph()),
            format!("{:.4e}", obs.values()[S_H2]),
            format!("{:.4}", obs.values()[S_IN]),
            format!("{:.1}", obs.normalised_gas_flow()),
            format!("{:.4}", obs.values()[47])
        ]);
    }
    table.printstd();
}

pub fn digester_examples(task: usize) {
    match task {
        0 => {
            // BSM2 digester fed by the thickened sludge, 10 days with RK4
            let p = InterfaceParameters::default();
            let (u, warnings) = match asm2adm(&thickened_sludge(), 7.2631, &p) {
                Ok(result) => result,
                Err(e) => {
                    println!("cannot convert the feed: {}", e);
                    return;
                }
            };
            for w in &warnings {
                println!("{}", w);
            }
            let mut digester = match AnaerobicDigester::bsm2() {
                Ok(d) => d,
                Err(e) => {
                    println!("{}", e);
                    return;
                }
            };
            let mut integrator = Integrator::from(RungeKutta4 { substeps: 10 });
            let trajectory = digester.simulate(&mut integrator, 1.0 / 96.0, 960, &u);
            trajectory_table(&trajectory, 48);
            if let Some((_, last)) = trajectory.last() {
                last.pretty_print();
                let params = digester.model().params();
                let gas = last.gas_production(params.p_atm, params.r, params.t_op);
                println!(
                    "methane {:.1} kg/d, hydrogen {:.4} kg/d, carbon dioxide {:.1} kg/d",
                    gas.ch4, gas.h2, gas.co2
                );
            }
            println!("solver diagnostics: {:?}", digester.diagnostics());
        }
        1 => {
            // ASM1 -> ADM1 -> ASM1 round trip of the sludge stream
            let p = InterfaceParameters::default();
            let sludge = thickened_sludge();
            let (adm, _) = match asm2adm(&sludge, PH_ADM_INIT, &p) {
                Ok(result) => result,
                Err(e) => {
                    println!("asm2adm failed: {}", e);
                    return;
                }
            };
            let (back, _) = match adm2asm(&adm, PH_ADM_INIT, sludge[TEMP], &p) {
                Ok(result) => result,
                Err(e) => {
                    println!("adm2asm failed: {}", e);
                    return;
                }
            };
            let mut table = Table::new();
            table.add_row(row!["Variable", "ASM1 in", "ASM1 back"]);
            for i in 0..N_ASM {
                table.add_row(row![
                    ASM_NAMES[i],
                    format!("{:.4}", sludge[i]),
                    format!("{:.4}", back[i])
                ]);
            }
            table.printstd();
            println!(
                "COD: ASM1 {:.2} g/m3, ADM1 {:.2} g/m3, back {:.2} g/m3",
                asm_cod(&sludge),
                adm_cod(&adm),
                asm_cod(&back)
            );
        }
        2 => {
            // Euler against RK4 on one day of the reference steady state
            let mut u = InfluentVector::zeros();
            let reference = match AnaerobicDigester::bsm2() {
                Ok(d) => d,
                Err(e) => {
                    println!("{}", e);
                    return;
                }
            };
            for i in 0..=S_AN {
                u[i] = reference.state()[i];
            }
            u[U_Q] = 178.4674;
            u[U_T] = 35.0;
            let integrators = [
                Integrator::from(ExplicitEuler { substeps: 10 }),
                Integrator::from(RungeKutta4 { substeps: 5 }),
            ];
            let mut table = Table::new();
            table.add_row(row!["Integrator", "pH", "S_ac", "q_gas, m3/d"]);
            for mut integrator in integrators {
                let mut digester = reference.clone();
                let trajectory = digester.simulate(&mut integrator, 1.0 / 192.0, 192, &u);
                if let Some((_, obs)) = trajectory.last() {
                    table.add_row(row![
                        format!("{:?}", integrator),
                        format!("{:.5}", obs.ph()),
                        format!("{:.5}", obs.values()[S_AC]),
                        format!("{:.2}", obs.normalised_gas_flow())
                    ]);
                }
            }
            table.printstd();
        }
        3 => {
            // configuration file round trip
            let setup = DigesterSetup::default();
            let file_name = "digester_config.json";
            if let Err(e) = save_digester_config(&setup, file_name) {
                println!("{}", e);
                return;
            }
            match LoadData::new(file_name.to_string()).load_digester_setup() {
                Ok(loaded) => match loaded.digester() {
                    Ok(digester) => println!("loaded digester at pH {:.4}", digester.ions().ph()),
                    Err(e) => println!("{}", e),
                },
                Err(e) => println!("{}", e),
            }
        }
        _ => {
            println!("no such example: {}", task);
        }
    }
}
