//! Built-in question set: GATE 2024 computer networks questions.

use quiz_core::model::{ChoiceOption, OptionId, QuestionDraft, QuestionId, QuestionKindDraft};

fn options(labels: [&str; 4]) -> Vec<ChoiceOption> {
    labels
        .iter()
        .enumerate()
        .map(|(i, label)| ChoiceOption::new(format!("opt{}", i + 1), *label))
        .collect()
}

fn correct(ids: &[&str]) -> Vec<OptionId> {
    ids.iter().map(|id| OptionId::new(*id)).collect()
}

#[must_use]
pub fn bundled_drafts() -> Vec<QuestionDraft> {
    vec![
        QuestionDraft {
            id: QuestionId::new(1),
            title: "Question-01: ~ GATE 2024 Set 1 [Numerical]".into(),
            question_text: "Consider the entries shown below in the forwarding table of an IP router. \
Each entry consists of an IP prefix and the corresponding next hop router for packets whose \
destination IP address matches the prefix. The notation \u{201c}/N\u{201d} in a prefix indicates a \
subnet mask with the most significant N bits set to 1.<br><br>\
<pre>\nPrefix              Next Hop Router\n10.1.1.0/24         R1\n10.1.1.128/25       R2\n\
10.1.1.64/26        R3\n10.1.1.192/26       R4\n</pre>\
This router forwards 20 packets each to 5 hosts. The IP addresses of the hosts are \
<b>10.1.1.16, 10.1.1.72, 10.1.1.132, 10.1.1.191, and 10.1.1.205</b>.<br><br>\
<strong>Question:</strong> The number of packets forwarded via the next hop router R2 is _______"
                .into(),
            explanation: "R2 matches destination 10.1.1.132. Each host gets 20 packets \u{2192} R2 gets \
1 \u{d7} 20 = <strong>40 packets</strong>."
                .into(),
            kind: QuestionKindDraft::Numerical {
                correct_answer: 40.0,
            },
        },
        QuestionDraft {
            id: QuestionId::new(2),
            title: "Question-02: ~ GATE 2024 Set 1 [Numerical]".into(),
            question_text: "Consider sending an IP datagram of size <b>1420 bytes</b> (including 20 bytes \
of IP header) from a sender to a receiver over a path of two links with a router between them.<br>\
The first link (sender to router) has an MTU (Maximum Transmission Unit) size of 542 bytes, while \
the second link (router to receiver) has an MTU size of 360 bytes.<br><br>\
<strong>Question:</strong> The number of fragments that would be delivered at the receiver is _______"
                .into(),
            explanation: "Data size = 1420 - 20 = 1400 bytes. Fragments created for the first link \
(MTU 542 \u{2192} 520 bytes of data per fragment, a multiple of 8) are split again by the second \
link's MTU (360 \u{2192} 336 bytes of data per fragment). Final delivered fragments count = \
<strong>6 fragments</strong>."
                .into(),
            kind: QuestionKindDraft::Numerical {
                correct_answer: 6.0,
            },
        },
        QuestionDraft {
            id: QuestionId::new(3),
            title: "Question-03: ~ GATE 2024 Set 2 [MSQ]".into(),
            question_text: "Node X has a TCP connection open to node Y. The packets from X to Y go \
through an intermediate IP router R. Ethernet switch S is the first switch on the network path \
between X and R. Consider a packet sent from X to Y over this connection.<br><br>\
<strong>Which of the following statements is/are TRUE about the destination IP and MAC addresses \
on this packet at the time it leaves X?</strong>"
                .into(),
            explanation: "\u{2714} (B) True: Destination IP is Y (IP is end-to-end).<br>\
\u{274c} Others are incorrect because the destination MAC belongs to the next IP hop (router R), \
not switch S or Y."
                .into(),
            kind: QuestionKindDraft::MultiSelect {
                options: options([
                    "(A) The destination IP address is the IP address of R",
                    "(B) The destination IP address is the IP address of Y",
                    "(C) The destination MAC address is the MAC address of S",
                    "(D) The destination MAC address is the MAC address of Y",
                ]),
                correct: correct(&["opt2"]),
            },
        },
        QuestionDraft {
            id: QuestionId::new(4),
            title: "Question-04: ~ GATE 2024 Set 2 [MSQ]".into(),
            question_text: "Which of the following statements about IPv4 fragmentation are TRUE?".into(),
            explanation: "\u{2714} (B) True: Routers fragment datagrams if MTU is too small.<br>\
\u{2714} (C) True: Reassembly is always done at the final destination.<br>\
\u{274c} (A) & (D) are incorrect."
                .into(),
            kind: QuestionKindDraft::MultiSelect {
                options: options([
                    "(A) Fragmentation is done only at the source.",
                    "(B) Fragmentation is done at routers if needed.",
                    "(C) Reassembly is done only at the destination.",
                    "(D) Reassembly is done at intermediate routers too.",
                ]),
                correct: correct(&["opt2", "opt3"]),
            },
        },
        QuestionDraft {
            id: QuestionId::new(5),
            title: "Question-05: ~ GATE 2024 Set 2 [MSQ]".into(),
            question_text: "Which of the following fields of an IP header is/are always modified by \
any router before it forwards the IP packet?"
                .into(),
            explanation: "\u{2714} (C) <strong>Time to Live (TTL)</strong>: TTL is decreased by 1 by \
each router to avoid infinite looping of packets in the network.<br>\
\u{2714} (D) <strong>Header Checksum</strong>: Since TTL changes, the checksum must be recalculated \
by the router to reflect the updated header.<br>\
\u{274c} (A) Source IP and \u{274c} (B) Protocol are set by the sender and remain unchanged during routing."
                .into(),
            kind: QuestionKindDraft::MultiSelect {
                options: options([
                    "(A) Source IP Address",
                    "(B) Protocol",
                    "(C) Time to Live (TTL)",
                    "(D) Header Checksum",
                ]),
                correct: correct(&["opt3", "opt4"]),
            },
        },
    ]
}
