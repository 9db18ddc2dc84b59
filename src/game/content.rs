//! Embedded reference content: role metadata, scenarios and terminal
//! challenges.
//!
//! Everything here is immutable data, not state. Scenario progression,
//! scoring and persistence only ever read these tables.

use serde::Serialize;

use super::state::{Impact, Role};

/// Presentation metadata for a playable role.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RoleInfo {
    pub role: Role,
    pub title: &'static str,
    pub subtitle: &'static str,
    pub emoji: &'static str,
    pub description: &'static str,
    /// Gradient accent classes consumed by the front-end.
    pub color: &'static str,
}

/// One selectable answer to a scenario.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Choice {
    pub id: &'static str,
    pub text: &'static str,
    pub consequence: &'static str,
    pub impact: Impact,
    /// Whether this choice moves the avatar up rather than down.
    pub good: bool,
}

/// One narrative decision point.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Scenario {
    pub id: &'static str,
    pub role: Role,
    pub title: &'static str,
    pub situation: &'static str,
    pub choices: &'static [Choice],
}

/// A side mini-game asking for a literal shell command.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct TerminalChallenge {
    pub id: &'static str,
    pub role: Role,
    pub title: &'static str,
    pub problem: &'static str,
    pub mission: &'static str,
    pub expected_command: &'static str,
    pub hint: &'static str,
    pub success_message: &'static str,
    pub lesson: &'static str,
    pub impact: Impact,
}

/// The four roles, in presentation order.
pub static ROLES: [RoleInfo; 4] = [
    RoleInfo {
        role: Role::Directeur,
        title: "Le Directeur",
        subtitle: "Le Stratège",
        emoji: "🎓",
        description: "Gérez le budget de l'établissement et résistez à la pression commerciale des Big Tech.",
        color: "from-blue-500 to-indigo-600",
    },
    RoleInfo {
        role: Role::Technicien,
        title: "Le Technicien",
        subtitle: "Le Druide",
        emoji: "🔧",
        description: "Faites des miracles avec du vieux matériel. Réparez plutôt que jeter !",
        color: "from-emerald-500 to-teal-600",
    },
    RoleInfo {
        role: Role::Eleve,
        title: "L'Élève",
        subtitle: "Le Futur",
        emoji: "🎒",
        description: "Réussissez vos études tout en protégeant votre vie privée des Big Tech.",
        color: "from-amber-500 to-orange-600",
    },
    RoleInfo {
        role: Role::Parent,
        title: "Le Parent",
        subtitle: "Le Gardien",
        emoji: "🏠",
        description: "Gérez le budget familial et protégez vos enfants du pistage publicitaire.",
        color: "from-pink-500 to-rose-600",
    },
];

static DIRECTEUR_SCENARIOS: [Scenario; 5] = [
    Scenario {
        id: "dir-1",
        role: Role::Directeur,
        title: "La Facture Microsoft",
        situation: "Le représentant Microsoft vous propose une réduction de 20% si vous signez un contrat cloud pour 5 ans. \"C'est une offre exceptionnelle !\" dit-il avec un sourire commercial.",
        choices: &[
            Choice {
                id: "dir-1-a",
                text: "Signer immédiatement - C'est une bonne affaire !",
                consequence: "Vous êtes maintenant dépendant pendant 5 ans. Les données des élèves sont stockées aux USA.",
                impact: Impact { money: -15000, co2: -500, nird: -30 },
                good: false,
            },
            Choice {
                id: "dir-1-b",
                text: "Refuser et investir dans la formation aux logiciels libres",
                consequence: "Autonomie acquise ! Les profs découvrent LibreOffice et adorent.",
                impact: Impact { money: 8000, co2: 200, nird: 40 },
                good: true,
            },
            Choice {
                id: "dir-1-c",
                text: "Demander un délai pour étudier les alternatives",
                consequence: "Sage décision. Vous découvrez que la Forge des Communs propose des solutions gratuites.",
                impact: Impact { money: 3000, co2: 100, nird: 20 },
                good: true,
            },
        ],
    },
    Scenario {
        id: "dir-2",
        role: Role::Directeur,
        title: "Les 200 PC Condamnés",
        situation: "Windows 10 arrive en fin de vie. Vos 200 ordinateurs ne supportent pas Windows 11. Le fournisseur propose de tout remplacer pour 180 000€.",
        choices: &[
            Choice {
                id: "dir-2-a",
                text: "Commander les nouveaux PC - Pas le choix !",
                consequence: "200 PC parfaitement fonctionnels partent à la décharge. Budget explosé.",
                impact: Impact { money: -180_000, co2: -4000, nird: -50 },
                good: false,
            },
            Choice {
                id: "dir-2-b",
                text: "Contacter le collectif NIRD pour une migration Linux",
                consequence: "Les PC revivent sous Linux ! Les élèves du club info aident à l'installation.",
                impact: Impact { money: 175_000, co2: 3800, nird: 80 },
                good: true,
            },
        ],
    },
    Scenario {
        id: "dir-3",
        role: Role::Directeur,
        title: "L'Audit Numérique",
        situation: "La région propose un audit gratuit de votre infrastructure numérique. Le rapport recommande de passer à des solutions souveraines.",
        choices: &[
            Choice {
                id: "dir-3-a",
                text: "Ignorer le rapport - On n'a pas le temps",
                consequence: "Quelques mois plus tard, une fuite de données fait scandale...",
                impact: Impact { money: -5000, co2: 0, nird: -20 },
                good: false,
            },
            Choice {
                id: "dir-3-b",
                text: "Lancer un plan de transition numérique responsable",
                consequence: "Votre établissement devient un exemple régional !",
                impact: Impact { money: 12000, co2: 500, nird: 60 },
                good: true,
            },
        ],
    },
    Scenario {
        id: "dir-4",
        role: Role::Directeur,
        title: "Le Cloud Éducatif",
        situation: "Google propose gratuitement Google Workspace for Education. \"C'est gratuit et tout le monde l'utilise !\"",
        choices: &[
            Choice {
                id: "dir-4-a",
                text: "Accepter - C'est gratuit après tout",
                consequence: "Les données des élèves alimentent les algorithmes publicitaires de Google.",
                impact: Impact { money: 0, co2: -200, nird: -40 },
                good: false,
            },
            Choice {
                id: "dir-4-b",
                text: "Choisir les Apps Education de l'État français",
                consequence: "Données hébergées en France, respect du RGPD, indépendance garantie.",
                impact: Impact { money: 2000, co2: 150, nird: 50 },
                good: true,
            },
        ],
    },
    Scenario {
        id: "dir-5",
        role: Role::Directeur,
        title: "La Salle Informatique",
        situation: "La salle info a besoin d'être rénovée. Deux propositions : équipement neuf classique ou reconditionnement avec Linux.",
        choices: &[
            Choice {
                id: "dir-5-a",
                text: "Équipement neuf standard (Windows)",
                consequence: "Classique mais coûteux. Obsolète dans 4 ans.",
                impact: Impact { money: -45000, co2: -800, nird: -10 },
                good: false,
            },
            Choice {
                id: "dir-5-b",
                text: "PC reconditionnés + Linux",
                consequence: "Économique et écologique ! Les élèves apprennent le vrai fonctionnement d'un ordinateur.",
                impact: Impact { money: 35000, co2: 600, nird: 70 },
                good: true,
            },
        ],
    },
];

static TECHNICIEN_SCENARIOS: [Scenario; 5] = [
    Scenario {
        id: "tech-1",
        role: Role::Technicien,
        title: "Le PC Mourant",
        situation: "Un Dell de 2014 rame sous Windows 10. Le directeur veut le jeter. Mais vous, vous voyez du potentiel...",
        choices: &[
            Choice {
                id: "tech-1-a",
                text: "Le mettre à la poubelle - Il est trop vieux",
                consequence: "Un PC parfaitement fonctionnel finit à la décharge. 50kg de déchets électroniques.",
                impact: Impact { money: -400, co2: -50, nird: -20 },
                good: false,
            },
            Choice {
                id: "tech-1-b",
                text: "Installer Linux Mint et lui donner une seconde vie",
                consequence: "Le PC est plus rapide qu'avant ! Il servira encore 5 ans.",
                impact: Impact { money: 400, co2: 45, nird: 40 },
                good: true,
            },
        ],
    },
    Scenario {
        id: "tech-2",
        role: Role::Technicien,
        title: "La Migration Massive",
        situation: "50 postes doivent être migrés vers Linux ce week-end. Seul, c'est impossible.",
        choices: &[
            Choice {
                id: "tech-2-a",
                text: "Abandonner - C'est trop de travail",
                consequence: "Les PC restent sous Windows obsolète. Failles de sécurité garanties.",
                impact: Impact { money: -2000, co2: -100, nird: -30 },
                good: false,
            },
            Choice {
                id: "tech-2-b",
                text: "Organiser une \"Install Party\" avec le club Linux",
                consequence: "Les élèves adorent ! 50 PC migrés en une journée, ambiance pizza et musique.",
                impact: Impact { money: 5000, co2: 200, nird: 60 },
                good: true,
            },
        ],
    },
    Scenario {
        id: "tech-3",
        role: Role::Technicien,
        title: "Le Serveur Local",
        situation: "L'établissement paie 500€/mois pour un cloud externe. Vous avez une vieille tour qui pourrait servir...",
        choices: &[
            Choice {
                id: "tech-3-a",
                text: "Continuer avec le cloud - C'est plus simple",
                consequence: "Les factures continuent. Les données sont hébergées on ne sait où.",
                impact: Impact { money: -6000, co2: -300, nird: -15 },
                good: false,
            },
            Choice {
                id: "tech-3-b",
                text: "Monter un serveur Nextcloud local",
                consequence: "Indépendance numérique acquise ! Plus de frais mensuels.",
                impact: Impact { money: 6000, co2: 250, nird: 55 },
                good: true,
            },
        ],
    },
    Scenario {
        id: "tech-4",
        role: Role::Technicien,
        title: "Les Imprimantes Capricieuses",
        situation: "Les imprimantes HP refusent les cartouches compatibles. Le fabricant veut vous forcer à acheter ses cartouches hors de prix.",
        choices: &[
            Choice {
                id: "tech-4-a",
                text: "Acheter les cartouches originales",
                consequence: "80€ la cartouche au lieu de 15€. Le budget fond comme neige.",
                impact: Impact { money: -2000, co2: -50, nird: -10 },
                good: false,
            },
            Choice {
                id: "tech-4-b",
                text: "Flasher le firmware et libérer les imprimantes",
                consequence: "Victoire ! Les cartouches génériques fonctionnent maintenant.",
                impact: Impact { money: 1800, co2: 40, nird: 35 },
                good: true,
            },
        ],
    },
    Scenario {
        id: "tech-5",
        role: Role::Technicien,
        title: "La Documentation",
        situation: "Vous avez accumulé des années de savoir-faire. Si vous partez, tout sera perdu.",
        choices: &[
            Choice {
                id: "tech-5-a",
                text: "Garder les secrets - C'est mon pouvoir",
                consequence: "Quand vous serez malade, personne ne saura réparer quoi que ce soit.",
                impact: Impact { money: 0, co2: 0, nird: -25 },
                good: false,
            },
            Choice {
                id: "tech-5-b",
                text: "Créer un wiki et former les collègues",
                consequence: "Le savoir est partagé ! L'équipe devient autonome.",
                impact: Impact { money: 3000, co2: 100, nird: 50 },
                good: true,
            },
        ],
    },
];

static ELEVE_SCENARIOS: [Scenario; 5] = [
    Scenario {
        id: "eleve-1",
        role: Role::Eleve,
        title: "Le Logiciel de Retouche",
        situation: "Pour ton projet d'arts plastiques, il te faut un logiciel de retouche photo. Photoshop coûte 24€/mois...",
        choices: &[
            Choice {
                id: "eleve-1-a",
                text: "Demander l'abonnement Photoshop aux parents",
                consequence: "Ça fait 288€ par an. Et tu es pisté par Adobe.",
                impact: Impact { money: -288, co2: -20, nird: -15 },
                good: false,
            },
            Choice {
                id: "eleve-1-b",
                text: "Télécharger GIMP, c'est gratuit et libre !",
                consequence: "Tu découvres que GIMP fait tout ce dont tu as besoin. Et c'est gratuit à vie !",
                impact: Impact { money: 288, co2: 15, nird: 30 },
                good: true,
            },
        ],
    },
    Scenario {
        id: "eleve-2",
        role: Role::Eleve,
        title: "Le Réseau Social",
        situation: "Tous tes amis sont sur Instagram et TikTok. Mais tu as entendu parler des problèmes de vie privée...",
        choices: &[
            Choice {
                id: "eleve-2-a",
                text: "S'inscrire partout - FOMO oblige !",
                consequence: "Tes données personnelles nourrissent les algorithmes. Tu passes 4h/jour à scroller.",
                impact: Impact { money: 0, co2: -50, nird: -25 },
                good: false,
            },
            Choice {
                id: "eleve-2-b",
                text: "Créer un compte sur Mastodon et limiter le reste",
                consequence: "Tu découvres une communauté plus saine. Moins de temps perdu !",
                impact: Impact { money: 0, co2: 30, nird: 35 },
                good: true,
            },
        ],
    },
    Scenario {
        id: "eleve-3",
        role: Role::Eleve,
        title: "Le Travail Collaboratif",
        situation: "Ton groupe de projet utilise Google Docs. Mais le prof a mentionné des alternatives souveraines...",
        choices: &[
            Choice {
                id: "eleve-3-a",
                text: "Rester sur Google - Tout le monde connaît",
                consequence: "Pratique, mais Google analyse tous vos documents.",
                impact: Impact { money: 0, co2: -15, nird: -10 },
                good: false,
            },
            Choice {
                id: "eleve-3-b",
                text: "Proposer Cryptpad ou les Pads de l'éducation nationale",
                consequence: "Le prof est impressionné ! Bonus pour l'initiative.",
                impact: Impact { money: 0, co2: 10, nird: 40 },
                good: true,
            },
        ],
    },
    Scenario {
        id: "eleve-4",
        role: Role::Eleve,
        title: "L'Ordinateur pour les Études",
        situation: "Tu as besoin d'un nouvel ordi pour le lycée. MacBook ou PC gamer, ton cœur balance...",
        choices: &[
            Choice {
                id: "eleve-4-a",
                text: "MacBook dernier cri - Pour le style !",
                consequence: "Joli mais irréparable. Dans 3 ans, il sera obsolète.",
                impact: Impact { money: -1500, co2: -80, nird: -20 },
                good: false,
            },
            Choice {
                id: "eleve-4-b",
                text: "ThinkPad reconditionné avec Linux",
                consequence: "Indestructible, réparable, et tu apprends plein de trucs !",
                impact: Impact { money: 1200, co2: 60, nird: 50 },
                good: true,
            },
        ],
    },
    Scenario {
        id: "eleve-5",
        role: Role::Eleve,
        title: "Le Code Source",
        situation: "Ton projet de NSI est terminé. Tu pourrais le garder secret ou le partager...",
        choices: &[
            Choice {
                id: "eleve-5-a",
                text: "Garder le code pour moi - C'est mon travail",
                consequence: "Personne n'en profite. L'an prochain, tu auras oublié comment ça marche.",
                impact: Impact { money: 0, co2: 0, nird: -10 },
                good: false,
            },
            Choice {
                id: "eleve-5-b",
                text: "Le publier sur la Forge des Communs sous licence libre",
                consequence: "D'autres élèves améliorent ton code ! Tu es mentionné comme contributeur.",
                impact: Impact { money: 0, co2: 5, nird: 45 },
                good: true,
            },
        ],
    },
];

static PARENT_SCENARIOS: [Scenario; 5] = [
    Scenario {
        id: "parent-1",
        role: Role::Parent,
        title: "Le Dilemme de Noël",
        situation: "Votre enfant veut un ordinateur pour le collège. Les catalogues vantent les dernières nouveautés à 800€...",
        choices: &[
            Choice {
                id: "parent-1-a",
                text: "Acheter le dernier modèle à crédit",
                consequence: "Stress financier. Et dans 3 ans, l'ordi rame déjà.",
                impact: Impact { money: -800, co2: -60, nird: -20 },
                good: false,
            },
            Choice {
                id: "parent-1-b",
                text: "Récupérer l'ancien PC du bureau et installer Linux ensemble",
                consequence: "Moment de partage magique ! Votre enfant apprend vraiment l'informatique.",
                impact: Impact { money: 800, co2: 55, nird: 50 },
                good: true,
            },
        ],
    },
    Scenario {
        id: "parent-2",
        role: Role::Parent,
        title: "Le Contrôle Parental",
        situation: "Vous voulez protéger vos enfants sur Internet. Les solutions commerciales coûtent 100€/an...",
        choices: &[
            Choice {
                id: "parent-2-a",
                text: "Acheter Norton Family ou Qustodio",
                consequence: "Ça marche, mais ça scanne aussi TOUTES les activités de vos enfants pour les revendre.",
                impact: Impact { money: -100, co2: -10, nird: -15 },
                good: false,
            },
            Choice {
                id: "parent-2-b",
                text: "Configurer un DNS familial avec OpenDNS ou Pi-hole",
                consequence: "Gratuit, respectueux de la vie privée, et vous apprenez des choses !",
                impact: Impact { money: 100, co2: 8, nird: 40 },
                good: true,
            },
        ],
    },
    Scenario {
        id: "parent-3",
        role: Role::Parent,
        title: "La Suite Office",
        situation: "L'école demande que les devoirs soient rendus au format Word. Microsoft 365 coûte 99€/an...",
        choices: &[
            Choice {
                id: "parent-3-a",
                text: "S'abonner à Microsoft 365",
                consequence: "Ça fonctionne mais c'est un abonnement à vie.",
                impact: Impact { money: -99, co2: -15, nird: -10 },
                good: false,
            },
            Choice {
                id: "parent-3-b",
                text: "Installer LibreOffice et exporter en .docx",
                consequence: "Gratuit à vie ! Et ça fait exactement la même chose.",
                impact: Impact { money: 99, co2: 12, nird: 35 },
                good: true,
            },
        ],
    },
    Scenario {
        id: "parent-4",
        role: Role::Parent,
        title: "Le Smartphone de Rentrée",
        situation: "Votre ado réclame le dernier iPhone. Tous ses copains l'ont, dit-il...",
        choices: &[
            Choice {
                id: "parent-4-a",
                text: "Céder à la pression - Il sera heureux",
                consequence: "1200€ plus tard, le téléphone aura un écran cassé dans 6 mois.",
                impact: Impact { money: -1200, co2: -40, nird: -25 },
                good: false,
            },
            Choice {
                id: "parent-4-b",
                text: "Proposer un Fairphone reconditionné",
                consequence: "Réparable, éthique, et votre ado apprend la valeur des choses.",
                impact: Impact { money: 900, co2: 35, nird: 45 },
                good: true,
            },
        ],
    },
    Scenario {
        id: "parent-5",
        role: Role::Parent,
        title: "L'Imprimante Familiale",
        situation: "L'imprimante HP affiche \"cartouche non reconnue\" alors qu'elle est neuve. Le service client propose de racheter des originales.",
        choices: &[
            Choice {
                id: "parent-5-a",
                text: "Commander les cartouches HP officielles",
                consequence: "50€ la cartouche. Le business model des imprimantes vous piège.",
                impact: Impact { money: -150, co2: -20, nird: -10 },
                good: false,
            },
            Choice {
                id: "parent-5-b",
                text: "Acheter une Brother sans DRM et des génériques",
                consequence: "L'imprimante coûte le même prix mais les cartouches sont 5x moins chères.",
                impact: Impact { money: 200, co2: 15, nird: 30 },
                good: true,
            },
        ],
    },
];

/// The six terminal challenges across all roles.
pub static TERMINAL_CHALLENGES: [TerminalChallenge; 6] = [
    TerminalChallenge {
        id: "term-1",
        role: Role::Technicien,
        title: "La Résurrection",
        problem: "Ce vieux PC de 2015 est trop lent pour Windows 11. Il va partir à la poubelle...",
        mission: "Voir ce qui consomme toute la mémoire et les ressources.",
        expected_command: "htop",
        hint: "Une commande pour voir les processus en temps réel...",
        success_message: "Parfait ! Tu vois maintenant chaque processus. Le coupable : un antivirus qui mange 80% de la RAM !",
        lesson: "💡 htop permet de voir l'intérieur du moteur. Avec Linux, TU as le contrôle.",
        impact: Impact { money: 400, co2: 45, nird: 30 },
    },
    TerminalChallenge {
        id: "term-2",
        role: Role::Eleve,
        title: "L'Installation Express",
        problem: "Il te faut un logiciel de retouche photo pour le devoir d'Arts Plastiques. La licence Adobe coûte 24€/mois...",
        mission: "Installer une alternative libre et gratuite immédiatement.",
        expected_command: "sudo apt install gimp",
        hint: "apt permet d'installer des logiciels. Le logiciel s'appelle GIMP...",
        success_message: "GIMP s'installe en quelques secondes ! Pas de compte, pas de pub, pas d'abonnement.",
        lesson: "💡 Sous Linux, on installe des logiciels sûrs en une ligne de commande. C'est magique.",
        impact: Impact { money: 288, co2: 15, nird: 35 },
    },
    TerminalChallenge {
        id: "term-3",
        role: Role::Directeur,
        title: "La Grande Mise à Jour",
        problem: "Les 200 PC du lycée ont besoin d'être mis à jour. Windows Update prendrait des heures...",
        mission: "Lancer la mise à jour de tous les logiciels en une commande.",
        expected_command: "sudo apt upgrade",
        hint: "apt upgrade met à jour tous les logiciels installés...",
        success_message: "Tous les logiciels sont à jour ! Sécurité maximale, sans redémarrage intempestif.",
        lesson: "💡 Sous Linux, les mises à jour sont rapides, silencieuses et respectent votre travail.",
        impact: Impact { money: 5000, co2: 200, nird: 50 },
    },
    TerminalChallenge {
        id: "term-4",
        role: Role::Parent,
        title: "Le Nettoyage de Printemps",
        problem: "L'ordinateur familial est plein de fichiers temporaires et de caches inutiles.",
        mission: "Nettoyer les paquets inutilisés et libérer de l'espace.",
        expected_command: "sudo apt autoremove",
        hint: "autoremove nettoie les dépendances orphelines...",
        success_message: "2.5 Go libérés ! Le PC respire à nouveau.",
        lesson: "💡 autoremove supprime proprement les logiciels dont on n'a plus besoin.",
        impact: Impact { money: 50, co2: 10, nird: 20 },
    },
    TerminalChallenge {
        id: "term-5",
        role: Role::Technicien,
        title: "Le Réseau Mystérieux",
        problem: "Un appareil inconnu utilise la bande passante. Qui squatte le réseau ?",
        mission: "Scanner le réseau local pour identifier les appareils connectés.",
        expected_command: "nmap -sn 192.168.1.0/24",
        hint: "nmap scanne le réseau. -sn fait un ping scan. Le réseau local est souvent en 192.168.1.x...",
        success_message: "Trouvé ! C'est le vieux Chromecast oublié qui télécharge des mises à jour.",
        lesson: "💡 nmap est l'outil des administrateurs réseau. Connais ton réseau !",
        impact: Impact { money: 100, co2: 5, nird: 25 },
    },
    TerminalChallenge {
        id: "term-6",
        role: Role::Eleve,
        title: "La Recherche de Fichiers",
        problem: "Tu as perdu ton exposé quelque part dans tes dossiers. Il s'appelait \"exposé_histoire\"...",
        mission: "Retrouver le fichier perdu dans tout le système.",
        expected_command: "find / -name \"*exposé*\"",
        hint: "find cherche des fichiers. Le / cherche partout. -name filtre par nom...",
        success_message: "Fichier trouvé dans ~/Documents/2024/Rendu_final/ ! Ouf !",
        lesson: "💡 find est ultra puissant pour retrouver n'importe quel fichier.",
        impact: Impact { money: 0, co2: 2, nird: 15 },
    },
];

/// Presentation metadata for a role.
#[must_use]
pub fn role_info(role: Role) -> &'static RoleInfo {
    match role {
        Role::Directeur => &ROLES[0],
        Role::Technicien => &ROLES[1],
        Role::Eleve => &ROLES[2],
        Role::Parent => &ROLES[3],
    }
}

/// The scenario campaign for a role, in play order.
#[must_use]
pub fn scenarios_for(role: Role) -> &'static [Scenario] {
    match role {
        Role::Directeur => &DIRECTEUR_SCENARIOS,
        Role::Technicien => &TECHNICIEN_SCENARIOS,
        Role::Eleve => &ELEVE_SCENARIOS,
        Role::Parent => &PARENT_SCENARIOS,
    }
}

/// Number of scenarios in a role's campaign.
#[must_use]
pub fn scenario_count(role: Role) -> usize {
    scenarios_for(role).len()
}

/// Terminal challenges targeted at a role.
#[must_use]
pub fn challenges_for(role: Role) -> Vec<&'static TerminalChallenge> {
    TERMINAL_CHALLENGES.iter().filter(|c| c.role == role).collect()
}

/// Look up a terminal challenge by id.
#[must_use]
pub fn find_challenge(id: &str) -> Option<&'static TerminalChallenge> {
    TERMINAL_CHALLENGES.iter().find(|c| c.id == id)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_every_role_has_five_scenarios() {
        for role in Role::ALL {
            assert_eq!(scenario_count(role), 5, "role {}", role.id());
            for scenario in scenarios_for(role) {
                assert_eq!(scenario.role, role);
            }
        }
    }

    #[test]
    fn test_ids_are_unique() {
        let mut seen = HashSet::new();
        for role in Role::ALL {
            for scenario in scenarios_for(role) {
                assert!(seen.insert(scenario.id), "duplicate scenario {}", scenario.id);
                for choice in scenario.choices {
                    assert!(seen.insert(choice.id), "duplicate choice {}", choice.id);
                }
            }
        }
        for challenge in &TERMINAL_CHALLENGES {
            assert!(seen.insert(challenge.id), "duplicate challenge {}", challenge.id);
        }
    }

    #[test]
    fn test_every_scenario_offers_a_good_way_out() {
        for role in Role::ALL {
            for scenario in scenarios_for(role) {
                assert!(
                    scenario.choices.iter().any(|c| c.good),
                    "scenario {} has no good choice",
                    scenario.id
                );
                assert!(scenario.choices.len() >= 2);
            }
        }
    }

    #[test]
    fn test_every_role_has_a_challenge() {
        for role in Role::ALL {
            assert!(
                !challenges_for(role).is_empty(),
                "role {} has no terminal challenge",
                role.id()
            );
        }
    }

    #[test]
    fn test_find_challenge() {
        assert_eq!(find_challenge("term-5").unwrap().expected_command, "nmap -sn 192.168.1.0/24");
        assert!(find_challenge("term-99").is_none());
    }

    #[test]
    fn test_role_info_matches_role() {
        for role in Role::ALL {
            assert_eq!(role_info(role).role, role);
        }
    }
}
