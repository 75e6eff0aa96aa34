use crate::models::{DirectoryRequest, DisplayMode, Person, RecordKind};

use super::markup::{Html, Markup};
use super::{class_list, fragments, limited};

/// Card or grid listing of people. Photos only appear in card mode.
pub fn render_people(people: &[Person], request: &DirectoryRequest) -> Html {
    let people = limited(people, request.limit);
    if people.is_empty() {
        return fragments::empty(RecordKind::People, request.display);
    }

    let class = class_list(
        "creol-people-grid",
        &[
            ("creol-people-grid-mode", request.display == DisplayMode::Grid),
            ("creol-people-dark", request.dark_mode),
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
            ("aria-label", "People directory"),
        ],
        |m| {
            for person in people {
                render_card(m, person, request.display == DisplayMode::Card);
            }
        },
    );
    m.finish()
}

fn render_card(m: &mut Markup, person: &Person, with_photo: bool) {
    let name = person.full_name();

    m.element(
        "article",
        &[
            ("class", "creol-person-card align-items-start"),
            ("role", "listitem"),
            ("itemscope", ""),
            ("itemtype", "https://schema.org/Person"),
        ],
        |m| {
            if let Some(url) = person.image_url.as_deref().filter(|_| with_photo) {
                m.element("div", &[("class", "creol-person-image")], |m| {
                    m.void("img", &[("src", url), ("alt", name.as_str()), ("itemprop", "image")]);
                });
            }

            m.element("div", &[("class", "creol-person-body align-items-start")], |m| {
                m.text_element(
                    "h3",
                    &[("class", "creol-person-name text-center"), ("itemprop", "name")],
                    &name,
                );

                if let Some(position) = &person.position {
                    m.element(
                        "div",
                        &[("class", "creol-person-position text-center"), ("itemprop", "jobTitle")],
                        |m| {
                            m.inline(position);
                        },
                    );
                }

                if let Some(room) = &person.room {
                    m.element("div", &[("class", "creol-person-room text-center")], |m| {
                        m.text_element("span", &[("class", "screen-reader-text")], "Room: ");
                        m.text(room);
                    });
                }

                if let Some(phone) = &person.phone {
                    m.element(
                        "div",
                        &[("class", "creol-person-phone text-center"), ("itemprop", "telephone")],
                        |m| {
                            m.text_element("span", &[("class", "screen-reader-text")], "Phone: ");
                            m.text(phone);
                        },
                    );
                }

                if let Some(email) = &person.email {
                    let href = format!("mailto:{}", email);
                    let label = format!("Email {}", name);
                    m.element("div", &[("class", "creol-person-email text-center")], |m| {
                        m.text_element(
                            "a",
                            &[("href", href.as_str()), ("itemprop", "email"), ("aria-label", label.as_str())],
                            "Email",
                        );
                    });
                }
            });
        },
    );
}
