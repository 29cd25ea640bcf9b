// Demo mode: replay a realistic host layout through the instrumentation hooks
//
// Builds a txt2img-style page the way the host would: the base application
// lays out its own controls, then two extensions append their accordions.
// Call contexts carry script paths under `extensions/<name>/`, so attribution,
// the help-panel blacklist and the unsupported-type report all have
// something to show.
//
// Run with: TRANSLAYER_DEMO=1 cargo run --release

use serde_json::json;
use std::cell::Cell;

use crate::interceptor::{
    BlockScope, CallContext, HostComponent, Instrumentation, Widget, WidgetKind,
};

const WEBUI_ROOT: &str = "/opt/webui";

/// Call context for code running inside an extension script
fn extension_script(extension: &str, script: &str) -> CallContext {
    CallContext::frames([
        format!("{WEBUI_ROOT}/modules/ui.py"),
        format!("{WEBUI_ROOT}/modules/scripts.py"),
        format!("{WEBUI_ROOT}/extensions/{extension}/scripts/{script}"),
    ])
}

/// Call context for the host's own UI code
fn host_ui() -> CallContext {
    CallContext::frames([
        format!("{WEBUI_ROOT}/webui.py"),
        format!("{WEBUI_ROOT}/modules/ui.py"),
    ])
}

/// Build the demo layout; returns the number of components handed to the hooks
pub fn run_demo(hooks: &Instrumentation) -> usize {
    tracing::info!("Running in DEMO MODE - building scripted layout");

    let host = host_ui();
    let created = Cell::new(0usize);
    let leaf = |widget: Widget, ctx: &CallContext| {
        created.set(created.get() + 1);
        hooks.component_created(&HostComponent::new(widget), ctx);
    };
    let open = |widget: Widget, ctx: &CallContext| -> BlockScope {
        created.set(created.get() + 1);
        hooks.context_created(&HostComponent::new(widget), ctx)
    };

    let page = open(Widget::new(WidgetKind::Blocks), &host);
    let toolbar = open(Widget::new(WidgetKind::Row).elem_id("txt2img_toprow"), &host);
    leaf(
        Widget::new(WidgetKind::Textbox {
            placeholder: Some("Prompt".to_string()),
            lines: 3,
        })
        .label("Prompt")
        .elem_id("txt2img_prompt")
        .value(json!("a lighthouse at dusk")),
        &host,
    );
    leaf(
        Widget::new(WidgetKind::Button {
            variant: "primary".to_string(),
        })
        .label("Generate")
        .elem_id("txt2img_generate"),
        &host,
    );
    toolbar.exit();

    leaf(
        Widget::new(WidgetKind::Slider {
            minimum: 1.0,
            maximum: 150.0,
            step: 1.0,
        })
        .label("Sampling steps")
        .elem_id("txt2img_steps")
        .value(json!(20)),
        &host,
    );

    // ControlNet: input accordion with an image input the frontend can't render
    let controlnet = extension_script("sd-webui-controlnet", "controlnet.py");
    {
        let _unit = open(
            Widget::new(WidgetKind::InputAccordion { open: false })
                .label("ControlNet")
                .elem_id("txt2img_controlnet")
                .value(json!(false)),
            &controlnet,
        );
        leaf(
            Widget::new(WidgetKind::Checkbox)
                .label("Pixel Perfect")
                .value(json!(false)),
            &controlnet,
        );
        leaf(
            Widget::new(WidgetKind::Dropdown {
                choices: vec![
                    "none".to_string(),
                    "canny".to_string(),
                    "depth_midas".to_string(),
                    "openpose".to_string(),
                ],
                multiselect: false,
            })
            .label("Preprocessor")
            .value(json!("none")),
            &controlnet,
        );
        leaf(
            Widget::new(WidgetKind::Other {
                class_name: "Image".to_string(),
            })
            .label("Single Image")
            .elem_classes(["cnet-image"])
            .interactive(false),
            &controlnet,
        );

        // Documentation panels are not tracked
        let help = open(
            Widget::new(WidgetKind::Accordion { open: false })
                .label("Help")
                .elem_id("controlnet_help_accordion")
                .hidden(),
            &controlnet,
        );
        help.exit();
    }

    // ADetailer: fully renderable
    let adetailer = extension_script("adetailer", "!adetailer.py");
    {
        let _panel = open(
            Widget::new(WidgetKind::Accordion { open: false }).label("ADetailer"),
            &adetailer,
        );
        leaf(
            Widget::new(WidgetKind::Checkbox)
                .label("Enable ADetailer")
                .value(json!(true)),
            &adetailer,
        );
        let _row = open(Widget::new(WidgetKind::Row), &adetailer);
        leaf(
            Widget::new(WidgetKind::Dropdown {
                choices: vec!["face_yolov8n.pt".to_string(), "hand_yolov8n.pt".to_string()],
                multiselect: false,
            })
            .label("ADetailer model")
            .value(json!("face_yolov8n.pt")),
            &adetailer,
        );
        leaf(
            Widget::new(WidgetKind::Slider {
                minimum: 0.0,
                maximum: 1.0,
                step: 0.01,
            })
            .label("Detection model confidence threshold")
            .value(json!(0.3)),
            &adetailer,
        );
    }

    page.exit();

    created.get()
}
