use crate::models::{Alumnus, DirectoryRequest, DisplayMode, RecordKind};

use super::markup::{Html, Markup};
use super::{class_list, fragments, limited};

const TABLE_COLUMNS: [&str; 4] = ["Name", "Program", "Semester", "Advisor"];

/// Alumni listing as a table or as cards, per `request.display`.
pub fn render_alumni(alumni: &[Alumnus], request: &DirectoryRequest) -> Html {
    let alumni = limited(alumni, request.limit);
    if alumni.is_empty() {
        return fragments::empty(RecordKind::Alumni, request.display);
    }

    match request.display {
        DisplayMode::Table => render_table(alumni, request.dark_mode),
        DisplayMode::Card | DisplayMode::Grid => render_cards(alumni, request),
    }
}

fn render_cards(alumni: &[Alumnus], request: &DirectoryRequest) -> Html {
    let class = class_list(
        "creol-alumni-grid",
        &[
            ("creol-alumni-card-mode", request.display == DisplayMode::Card),
            ("creol-alumni-grid-mode", request.display == DisplayMode::Grid),
            ("creol-alumni-dark", request.dark_mode),
        ],
    );
    let style = format!("--creol-columns:{}", request.columns);

    let mut m = Markup::new();
    m.element(
        "div",
        &[
            ("class", class.as_str()),
            ("style", style.as_str()),
            ("role", "list"),
            ("aria-label", "Alumni directory"),
        ],
        |m| {
            for alumnus in alumni {
                render_card(m, alumnus);
            }
        },
    );
    m.finish()
}

fn render_card(m: &mut Markup, alumnus: &Alumnus) {
    m.element(
        "article",
        &[
            ("class", "creol-alumni-card align-items-start"),
            ("role", "listitem"),
            ("itemscope", ""),
            ("itemtype", "https://schema.org/Person"),
        ],
        |m| {
            m.element("div", &[("class", "creol-alumni-body align-items-start")], |m| {
                m.text_element(
                    "h3",
                    &[("class", "creol-alumni-name text-center"), ("itemprop", "name")],
                    &alumnus.name,
                );
                m.element(
                    "div",
                    &[("class", "creol-alumni-program text-center"), ("itemprop", "alumniOf")],
                    |m| {
                        m.inline(&alumnus.program);
                    },
                );
                m.text_element("div", &[("class", "creol-alumni-semester text-center")], &alumnus.semester);
                m.text_element("div", &[("class", "creol-alumni-degree text-center")], &alumnus.degree);
                if let Some(advisor) = &alumnus.advisor {
                    m.text_element(
                        "div",
                        &[("class", "creol-alumni-advisor text-center")],
                        &format!("Advisor: {}", advisor),
                    );
                }
            });
        },
    );
}

fn render_table(alumni: &[Alumnus], dark_mode: bool) -> Html {
    let wrapper_class = class_list("creol-alumni-table-wrapper", &[("creol-alumni-dark", dark_mode)]);

    let mut m = Markup::new();
    m.element(
        "div",
        &[
            ("class", wrapper_class.as_str()),
            ("role", "region"),
            ("aria-label", "Alumni table"),
        ],
        |m| {
            m.element(
                "table",
                &[
                    ("class", "creol-alumni-table"),
                    ("role", "table"),
                    ("aria-label", "Alumni: name, program, semester, and advisor."),
                ],
                |m| {
                    m.element("thead", &[("class", "creol-alumni-table-head")], |m| {
                        m.element("tr", &[("class", "creol-alumni-table-row"), ("role", "row")], |m| {
                            for column in TABLE_COLUMNS {
                                m.text_element("th", &[("scope", "col")], column);
                            }
                        });
                    });
                    m.element("tbody", &[("class", "creol-alumni-table-body")], |m| {
                        for alumnus in alumni {
                            render_row(m, alumnus);
                        }
                    });
                },
            );
        },
    );
    m.finish()
}

fn render_row(m: &mut Markup, alumnus: &Alumnus) {
    m.element("tr", &[("class", "creol-alumni-table-row"), ("role", "row")], |m| {
        let cell = [("class", "creol-alumni-table-cell"), ("role", "cell")];
        m.text_element("td", &[cell[0], cell[1], ("data-label", "Name")], &alumnus.name);
        m.element("td", &[cell[0], cell[1], ("data-label", "Program")], |m| {
            m.inline(&alumnus.program);
        });
        m.text_element("td", &[cell[0], cell[1], ("data-label", "Semester")], &alumnus.semester);
        m.text_element(
            "td",
            &[cell[0], cell[1], ("data-label", "Advisor")],
            alumnus.advisor.as_deref().unwrap_or_default(),
        );
    });
}
