//! DOM control panel: a toggle button, a range slider and a text field per
//! shape, above one shared error banner.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, HtmlInputElement};
use spin3d_core::speed::format_speed;
use spin3d_core::{ControlPanel, ShapeKind};

use crate::markup::{self, Part};

/// The widgets of one shape's control group
pub struct GroupWidgets {
    pub kind: ShapeKind,
    pub toggle: Element,
    pub slider: HtmlInputElement,
    pub field: HtmlInputElement,
}

pub struct ControlWidgets {
    pub banner: HtmlElement,
    pub groups: Vec<GroupWidgets>,
}

fn create<T: JsCast>(document: &Document, tag: &str) -> Result<T, JsValue> {
    document
        .create_element(tag)?
        .dyn_into::<T>()
        .map_err(|_| JsValue::from_str(&format!("<{tag}> has an unexpected type")))
}

fn build_group(document: &Document, parent: &Element, kind: ShapeKind) -> Result<GroupWidgets, JsValue> {
    let group: HtmlElement = create(document, "div")?;
    group.set_class_name("control-panel");
    group.style().set_css_text(markup::GROUP_STYLE);

    let toggle: Element = document.create_element("button")?;
    toggle.set_id(&markup::element_id(kind, Part::Toggle));
    toggle.set_text_content(Some(kind.toggle_label()));

    let label = document.create_element("label")?;
    label.set_text_content(Some("Rotation Speed: "));

    let slider: HtmlInputElement = create(document, "input")?;
    slider.set_type("range");
    slider.set_id(&markup::element_id(kind, Part::Slider));
    for (name, value) in markup::speed_range_attributes() {
        slider.set_attribute(name, &value)?;
    }

    let field: HtmlInputElement = create(document, "input")?;
    field.set_type("text");
    field.set_id(&markup::element_id(kind, Part::Field));
    field.style().set_css_text(markup::TEXT_STYLE);

    label.append_child(&slider)?;
    label.append_child(&field)?;
    group.append_child(&toggle)?;
    group.append_child(&label)?;
    parent.append_child(&group)?;

    Ok(GroupWidgets {
        kind,
        toggle,
        slider,
        field,
    })
}

impl ControlWidgets {
    /// Build the panel into `parent` and show `panel`'s current state.
    pub fn build(document: &Document, parent: &Element, panel: &ControlPanel) -> Result<Self, JsValue> {
        let container: HtmlElement = create(document, "div")?;
        container.set_class_name("controls");
        container.style().set_css_text(markup::CONTROLS_STYLE);

        let banner: HtmlElement = create(document, "div")?;
        banner.set_id(markup::BANNER_ID);
        banner.set_class_name("error-message");
        container.append_child(&banner)?;

        let groups = ShapeKind::ALL
            .iter()
            .map(|&kind| build_group(document, &container, kind))
            .collect::<Result<Vec<_>, _>>()?;
        parent.append_child(&container)?;

        let widgets = Self { banner, groups };
        widgets.refresh(panel);
        Ok(widgets)
    }

    /// Push panel state into the DOM. Fields are only rewritten when their
    /// text differs, so typing is never interrupted.
    pub fn refresh(&self, panel: &ControlPanel) {
        let error = panel.error();
        self.banner.set_text_content(error.get());
        self.banner
            .style()
            .set_css_text(markup::banner_style(!error.is_empty()));

        for group in &self.groups {
            let slider = format_speed(panel.slider(group.kind));
            if group.slider.value() != slider {
                group.slider.set_value(&slider);
            }
            let field = panel.field(group.kind);
            if group.field.value() != field {
                group.field.set_value(field);
            }
        }
    }
}
