//! FAQ intents recognized by the NLU app and their canned answers

use std::fmt;

/// Sent whenever the question cannot be matched to exactly one intent
pub const FALLBACK_MESSAGE: &str = "I'm not sure I understand what you're asking. \
You can try calling the Toll-Free HIV and AIDS Helpline and speak to a human - 0800-012-322";

/// A question category the NLU app is trained to recognize
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    CanYouHaveHivWithoutAids,
    DoesHavingSexWithAVirginCureHiv,
    HowToAvoidGettingHiv,
    HowToStayHealthyWithHiv,
    HowToTellIfYouHaveHiv,
    IsItSafeToGetAnInjection,
    IsThereACureForHivOrAids,
    WhatCausesAids,
    WhatCausesHiv,
    WhatHappensWhenYouHaveHiv,
    WhatIsAids,
    WhatIsAnImmuneSystem,
    WhatIsHiv,
    WhatIsTheDifferenceBetweenHivAndAids,
    WhatIsUnprotectedSex,
    WhatShouldIEat,
    WhereDidAidsComeFrom,
}

impl Intent {
    pub const ALL: [Intent; 17] = [
        Intent::CanYouHaveHivWithoutAids,
        Intent::DoesHavingSexWithAVirginCureHiv,
        Intent::HowToAvoidGettingHiv,
        Intent::HowToStayHealthyWithHiv,
        Intent::HowToTellIfYouHaveHiv,
        Intent::IsItSafeToGetAnInjection,
        Intent::IsThereACureForHivOrAids,
        Intent::WhatCausesAids,
        Intent::WhatCausesHiv,
        Intent::WhatHappensWhenYouHaveHiv,
        Intent::WhatIsAids,
        Intent::WhatIsAnImmuneSystem,
        Intent::WhatIsHiv,
        Intent::WhatIsTheDifferenceBetweenHivAndAids,
        Intent::WhatIsUnprotectedSex,
        Intent::WhatShouldIEat,
        Intent::WhereDidAidsComeFrom,
    ];

    /// Entity name as it appears in the NLU response
    pub fn entity_name(&self) -> &'static str {
        match self {
            Intent::CanYouHaveHivWithoutAids => "can_you_have_hiv_without_aids",
            Intent::DoesHavingSexWithAVirginCureHiv => "does_having_sex_with_a_virgin_cure_hiv",
            Intent::HowToAvoidGettingHiv => "how_to_avoid_getting_hiv",
            Intent::HowToStayHealthyWithHiv => "how_to_stay_healthy_with_hiv",
            Intent::HowToTellIfYouHaveHiv => "how_to_tell_if_you_have_hiv",
            Intent::IsItSafeToGetAnInjection => "is_it_safe_to_get_an_injection",
            Intent::IsThereACureForHivOrAids => "is_there_a_cure_for_hiv_or_aids",
            Intent::WhatCausesAids => "what_causes_aids",
            Intent::WhatCausesHiv => "what_causes_hiv",
            Intent::WhatHappensWhenYouHaveHiv => "what_happens_when_you_have_hiv",
            Intent::WhatIsAids => "what_is_aids",
            Intent::WhatIsAnImmuneSystem => "what_is_an_immune_system",
            Intent::WhatIsHiv => "what_is_hiv",
            Intent::WhatIsTheDifferenceBetweenHivAndAids => "what_is_the_difference_between_hiv_and_aids",
            Intent::WhatIsUnprotectedSex => "what_is_unprotected_sex",
            Intent::WhatShouldIEat => "what_should_i_eat",
            Intent::WhereDidAidsComeFrom => "where_did_aids_come_from",
        }
    }

    pub fn from_entity_name(name: &str) -> Option<Intent> {
        Intent::ALL.into_iter().find(|intent| intent.entity_name() == name)
    }

    /// Canned answer for this intent
    pub fn response(&self) -> String {
        match self {
            Intent::CanYouHaveHivWithoutAids => concat!(
                "A person can have HIV for a long time without having AIDS. ",
                "Most people don't look or feel sick when they first get HIV. ",
                "They may not get sick for a long time. The virus can stay in their blood for years. ",
                "At this stage, the person does not have AIDS. ",
                "Usually people with HIV get sick only after five to ten years."
            )
            .to_string(),

            Intent::DoesHavingSexWithAVirginCureHiv => concat!(
                "No, having sex with a virgin does not cure HIV or AIDS. ",
                "There is no cure for HIV or AIDS yet, but it is still possible to live a long and healthy life."
            )
            .to_string(),

            Intent::HowToAvoidGettingHiv => concat!(
                "Always remember the following rules to keep safe from HIV:",
                "\n1. Use a new condom every time you have sex. Unprotected sex spreads HIV!",
                "\n2. Avoid touching blood with your bare hands.",
                "\n3. Never touch a used injection needle, or a knife or a razor blade that has blood on it",
                "\n4. Cover a fresh open cut or bleeding wound with a plaster or bandage."
            )
            .to_string(),

            Intent::HowToStayHealthyWithHiv => concat!(
                "A person with HIV can stay healthy by:",
                "\n1. Taking the required medicines regularly.",
                "\n2. Eating fresh fruit and vegetables.",
                "\n3. Exercising and playing sport, but also making sure they get plenty of rest."
            )
            .to_string(),

            Intent::HowToTellIfYouHaveHiv => concat!(
                "The only way to know for sure if a person has HIV is to have a blood test at a clinic or hospital. ",
                "You cannot tell if someone has HIV by looking at them."
            )
            .to_string(),

            Intent::IsItSafeToGetAnInjection => concat!(
                "It is safe to have an injection at a clinic or a hospital. ",
                "Doctors and nurses use only sterile injection needles. ",
                "Sterile means that it is so clean that it has no germs on it."
            )
            .to_string(),

            Intent::IsThereACureForHivOrAids => format!(
                "There is no cure for HIV or AIDS yet, but it is still possible to live a long and healthy life.\n\n{}",
                Intent::HowToStayHealthyWithHiv.response()
            ),

            Intent::WhatCausesAids => "HIV causes AIDS".to_string(),

            Intent::WhatCausesHiv => concat!(
                "There are only three ways that people can get HIV:",
                "\n 1. By having unprotected sex with someone who has HIV",
                "\n 2. By allowing blood from an infected person to get into their own bloodstream. ",
                "For instance, if a person with HIV uses a needle to inject drugs, ",
                "and then shares the needle with someone else, the virus can be passed on",
                "\n 3. A mother with HIV can pass it on to her baby during pregnancy, in childbirth, or by breast-feeding.",
                "\n\n You *cannot* get HIV from someone sneezing or coughing near you. ",
                "You also cannot get HIV by touching, hugging or holding hands with someone who has HIV or AIDS"
            )
            .to_string(),

            Intent::WhatHappensWhenYouHaveHiv => concat!(
                "HIV slowly weakens the body's immune system. ",
                "Five to ten years after getting the virus, the immune system becomes so weak that it can't defend the body against infections. ",
                "The person with HIV then gets sick, usually with more than one illness. "
            )
            .to_string(),

            Intent::WhatIsAids => concat!(
                "AIDS stands for Acquired Immune Deficiency Syndrome. ",
                "\n\"Acquired\" means something that you get. ",
                "Most people get AIDS from having unprotected sex or by sharing needles to inject drugs ",
                "\n\n\"Immune Deficiency\" means that the body's immune system becomes damaged. ",
                "When the immune system is weak, the body cannot fight off illnesses the way it usually does.",
                "\n\n\"Syndrome\" means that a person gets several illnesses all at once."
            )
            .to_string(),

            Intent::WhatIsAnImmuneSystem => concat!(
                "Can you remember the last time you had a cold? ",
                "For a while, your head ached, you coughed and you sniffed. ",
                "Then the cold went away. This is because your body has an *immune system*. ",
                "The immune system defends the body, and fights the germs and viruses that make you ill. ",
                "But HIV attacks the immune system, and the body can no longer fight germs and infections"
            )
            .to_string(),

            Intent::WhatIsHiv => format!(
                "{}\n\n{}",
                concat!(
                    "HIV stands for Human Immunodeficiency Virus. Let's start with the short words: ",
                    "\n\"Human\" means that only people can get it. ",
                    "\nA \"virus\" is a type of germ that gets into a person's body. ",
                    "\n\"Immunodeficiency\" means that the body's immune system becomes weak"
                ),
                Intent::WhatIsAnImmuneSystem.response()
            ),

            Intent::WhatIsTheDifferenceBetweenHivAndAids => concat!(
                "There is a difference between HIV and AIDS. ",
                "People who have HIV can stay healthy for a long time. ",
                "They only start getting sick when their immune system is damaged and weak. ",
                "We then say that they have AIDS."
            )
            .to_string(),

            Intent::WhatIsUnprotectedSex => concat!(
                "Unprotected sex is any sex without a condom. ",
                "Sometimes the condom might break or slip off during sex. This still counts as unprotected sex.",
                "\n\nHaving unprotected sex puts you at risk of getting HIV. ",
                "It is important to use a condom when having sex."
            )
            .to_string(),

            Intent::WhatShouldIEat => concat!(
                "People with HIV or AIDS should eat plenty of fresh fruit, vegetables, chicken and fish ",
                "to stay healthy for as long as possible.",
                "\n\nFresh vegetables and fruit are full of vitamins. ",
                "Vitamins make the immune system strong, which helps your body to fight against illnesses."
            )
            .to_string(),

            Intent::WhereDidAidsComeFrom => concat!(
                "Nobody knows where HIV came from. ",
                "Scientists think that it is a new germ that appeared only some years ago. ",
                "HIV and AIDS were first identified in the early 1980s."
            )
            .to_string(),
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.entity_name())
    }
}

/// Canned answer for an NLU entity name.
///
/// Unknown names yield an empty string.
pub fn message_for_entity(entity_name: &str) -> String {
    match Intent::from_entity_name(entity_name) {
        Some(intent) => intent.response(),
        None => {
            tracing::warn!("No message defined for entity: {}", entity_name);
            String::new()
        }
    }
}
