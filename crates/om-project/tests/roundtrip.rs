use om_air::AirConstants;
use om_meter::{LengthUnit, Mounting};
use om_project::schema::*;
use om_project::{
    ProjectError, load, load_json, load_yaml, save_json, save_yaml, select_cases, solve_cases,
    validate_case_file,
};
use om_solver::SolveOptions;

fn custom_file() -> CaseFile {
    CaseFile {
        version: CURRENT_VERSION,
        cases: vec![CaseDef {
            id: "m1".to_string(),
            name: "Meter units with overrides".to_string(),
            geometry: GeometryDef {
                d_orifice: 0.05,
                d_pipe: 0.1,
                unit: LengthUnit::Meter,
                mounting: Mounting::Flange,
            },
            measurement: MeasurementDef {
                dp_pa: vec![-2000.0, 4000.0],
                p1_pa: vec![150_000.0],
                temperature: vec![300.0, 301.0],
            },
            humidity: 0.3,
            kappa: 1.39,
            solver: SolverDef {
                max_iterations: Some(50),
                ..SolverDef::default()
            },
            air: Some(AirConstants {
                vapor_pressure: 3170.0,
                ..AirConstants::default()
            }),
        }],
    }
}

#[test]
fn roundtrip_yaml_example() {
    let file = example_case_file();
    validate_case_file(&file).unwrap();

    let path = std::env::temp_dir().join("om_project_roundtrip_example.yaml");
    save_yaml(&path, &file).unwrap();
    let loaded = load_yaml(&path).unwrap();

    assert_eq!(file, loaded);
}

#[test]
fn roundtrip_json_with_overrides() {
    let file = custom_file();

    let path = std::env::temp_dir().join("om_project_roundtrip_custom.json");
    save_json(&path, &file).unwrap();
    let loaded = load_json(&path).unwrap();
    assert_eq!(file, loaded);

    let by_extension = load(&path).unwrap();
    assert_eq!(file, by_extension);
}

#[test]
fn save_rejects_invalid_file() {
    let mut file = custom_file();
    file.cases[0].humidity = -0.1;
    let path = std::env::temp_dir().join("om_project_invalid.yaml");
    assert!(matches!(
        save_yaml(&path, &file),
        Err(ProjectError::Validation(_))
    ));
}

#[test]
fn load_reports_yaml_errors() {
    let path = std::env::temp_dir().join("om_project_broken.yaml");
    std::fs::write(&path, "version: [not, a, number]").unwrap();
    assert!(matches!(load_yaml(&path), Err(ProjectError::Yaml(_))));
}

#[test]
fn overrides_reach_the_solver() {
    let file = custom_file();
    let case = &file.cases[0];
    assert_eq!(case.solver().config().max_iterations, 50);
    assert_eq!(case.solver().air().constants().vapor_pressure, 3170.0);

    let solution = case.solve(SolveOptions::default()).unwrap();
    assert_eq!(solution.qv.len(), 2);
    assert!(solution.qv[0] < 0.0 && solution.qv[1] > 0.0);
}

#[test]
fn case_selection() {
    let file = example_case_file();
    assert_eq!(select_cases(&file, None).unwrap().len(), 2);
    let one = select_cases(&file, Some("humid-series")).unwrap();
    assert_eq!(one[0].id, "humid-series");
    assert!(matches!(
        select_cases(&file, Some("missing")),
        Err(ProjectError::UnknownCase { .. })
    ));
}

#[test]
fn solve_all_cases_in_order() {
    let file = example_case_file();
    let cases = select_cases(&file, None).unwrap();
    let results = solve_cases(&cases, SolveOptions::default());
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].as_ref().unwrap().qv.len(), 1);
    assert_eq!(results[1].as_ref().unwrap().qv.len(), 3);
}
