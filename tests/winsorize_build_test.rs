use anyhow::Result;
use column_builder::core::editors::{Bound, WinsorizeEditor};
use column_builder::{
    ColumnKind, CompletionMode, CompletionSignal, HttpDatasetService, SubmissionPipeline,
    SubmitOutcome,
};
use httpmock::prelude::*;
use std::sync::{Arc, Mutex};

fn dtypes_body() -> serde_json::Value {
    serde_json::json!({
        "dtypes": [
            {"name": "col1", "dtype": "int64", "index": 0},
            {"name": "col2", "dtype": "string", "index": 1},
            {"name": "col3", "dtype": "object", "index": 2},
            {"name": "col4", "dtype": "datetime64[ns]", "index": 3}
        ],
        "success": true
    })
}

/// Builds a grouped winsorize column the way a user would through the form.
#[tokio::test]
async fn test_build_winsorize_column() -> Result<()> {
    let server = MockServer::start();

    let dtypes_mock = server.mock(|when, then| {
        when.method(GET).path("/dtale/dtypes/1");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(dtypes_body());
    });

    let expected_cfg = serde_json::json!({
        "col": "col1",
        "group": ["col2"],
        "limits": [0.2, 0.2],
        "inclusive": [true, false]
    });
    let build_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/dtale/build-column/1")
            .query_param("name", "conv_col")
            .query_param("type", "winsorize")
            .query_param(
                "cfg",
                r#"{"col":"col1","group":["col2"],"limits":[0.2,0.2],"inclusive":[true,false]}"#,
            );
        then.status(200).json_body(serde_json::json!({"success": true}));
    });

    let signals = Arc::new(Mutex::new(Vec::new()));
    let recorded = signals.clone();
    let service = HttpDatasetService::new(&server.base_url(), "1")?;
    let mut pipeline = SubmissionPipeline::new(
        service,
        CompletionMode::from_launch_path("/dtale/main/1"),
        move |signal: CompletionSignal| recorded.lock().unwrap().push(signal),
    );

    pipeline.load_columns().await;
    dtypes_mock.assert();
    assert!(pipeline.state().error().is_none());

    pipeline.set_name("conv_col");
    pipeline.select_kind(ColumnKind::Winsorize);

    let mut editor = WinsorizeEditor::new();
    assert_eq!(
        WinsorizeEditor::column_options(pipeline.state().editor_columns()),
        vec!["col1"]
    );
    pipeline.apply_editor_update(editor.select_column("col1"));
    pipeline.apply_editor_update(editor.select_group(vec!["col2".to_string()]));
    pipeline.apply_editor_update(editor.set_percentiles(20, 80));
    pipeline.apply_editor_update(editor.toggle_inclusive(Bound::Upper));

    assert_eq!(
        serde_json::to_value(pipeline.state().active_config().unwrap())?,
        expected_cfg
    );

    let outcome = pipeline.submit().await;
    assert_eq!(
        outcome,
        SubmitOutcome::Completed(CompletionSignal::RefreshPanelAndClose)
    );
    build_mock.assert_hits(1);
    assert_eq!(
        *signals.lock().unwrap(),
        vec![CompletionSignal::RefreshPanelAndClose]
    );

    Ok(())
}

#[tokio::test]
async fn test_winsorize_without_column_is_rejected_locally() -> Result<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/dtale/dtypes/1");
        then.status(200).json_body(dtypes_body());
    });
    let build_mock = server.mock(|when, then| {
        when.method(GET).path("/dtale/build-column/1");
        then.status(200).json_body(serde_json::json!({"success": true}));
    });

    let service = HttpDatasetService::new(&server.base_url(), "1")?;
    let mut pipeline = SubmissionPipeline::new(
        service,
        CompletionMode::EmbeddedPanel,
        |_: CompletionSignal| {},
    );
    pipeline.load_columns().await;
    pipeline.set_name("conv_col");
    pipeline.select_kind(ColumnKind::Winsorize);

    let mut editor = WinsorizeEditor::new();
    pipeline.apply_editor_update(editor.set_percentiles(5, 95));

    match pipeline.submit().await {
        SubmitOutcome::Rejected(error) => {
            assert_eq!(error.error, "Please select a column to winsorize!")
        }
        other => panic!("unexpected outcome: {:?}", other),
    }
    build_mock.assert_hits(0);

    Ok(())
}
