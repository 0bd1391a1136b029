use fairs::*;

#[allow(dead_code)]
pub fn numbers(values: &[i64]) -> Vec<WheelNumber> {
    values
        .iter()
        .map(|&v| WheelNumber::new(v).unwrap())
        .collect()
}

#[allow(dead_code)]
pub fn simulator(initial_capital: Continous, bet_amount: Continous, max_steps: usize) -> BettingSimulator {
    BettingSimulator::new(SimulatorConfig {
        initial_capital,
        bet_amount,
        max_steps,
        perceptive_size: 5,
    })
    .unwrap()
}

#[allow(dead_code)]
pub fn csv_of(values: &[i64]) -> String {
    let mut csv = String::from("id;timeseries\n");
    for (i, v) in values.iter().enumerate() {
        csv.push_str(&format!("{i};{v}\n"));
    }
    csv
}
